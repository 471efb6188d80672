//! Contact domain service.
//!
//! Implements the driving ports over a [`ContactRepository`], stamping
//! timestamps from an injected clock and translating persistence failures.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{ContactRepository, ContactsCommand, ContactsQuery};
use crate::domain::{
    CONTACT_LIST_LIMIT, Contact, ContactDraft, ContactId, Error, format_write_error,
    map_persistence_error,
};

/// Message returned when no contact matches a requested id.
pub const CONTACT_NOT_FOUND_MESSAGE: &str = "Contact Not Found";

/// Contact service implementing [`ContactsCommand`] and [`ContactsQuery`].
#[derive(Clone)]
pub struct ContactService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R> {
    /// Create a new service over the given repository and clock.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn create(&self, draft: ContactDraft) -> Result<Contact, Error> {
        let new_contact = draft.into_new_contact(self.clock.utc());
        let contact = self
            .repository
            .create(&new_contact)
            .await
            .map_err(format_write_error)?;
        debug!(contact_id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error> {
        let changes = draft.into_changes(self.clock.utc());
        self.repository
            .update(id, &changes)
            .await
            .map_err(format_write_error)?
            .ok_or_else(|| Error::internal(format!("no contact row with id {id} to update")))
    }

    async fn delete(&self, id: ContactId) -> Result<usize, Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        debug!(contact_id = %id, removed, "contact delete finished");
        Ok(removed)
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list(&self) -> Result<Vec<Contact>, Error> {
        self.repository
            .find_all(CONTACT_LIST_LIMIT)
            .await
            .map_err(map_persistence_error)
    }

    async fn get(&self, id: ContactId) -> Result<Contact, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
