//! Driving port for contact mutations.
//!
//! Inbound adapters hand over drafts that are already normalised and
//! validated; implementations stamp timestamps and persist them.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, Error};

/// Driving port for creating, updating, and deleting contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Persist a new contact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::DuplicateEntry`] when the email is
    /// already taken, or an internal error when storage fails.
    async fn create(&self, draft: ContactDraft) -> Result<Contact, Error>;

    /// Replace the name and email of an existing contact.
    ///
    /// # Errors
    ///
    /// Same failures as [`ContactsCommand::create`]. A missing row is reported
    /// as [`crate::domain::ErrorCode::InternalError`].
    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error>;

    /// Delete a contact, returning the number of rows removed.
    async fn delete(&self, id: ContactId) -> Result<usize, Error>;
}
