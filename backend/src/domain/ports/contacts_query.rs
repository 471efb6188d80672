//! Driving port for contact reads.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, Error};

/// Driving port for listing and fetching contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// List contacts, capped at [`crate::domain::CONTACT_LIST_LIMIT`].
    async fn list(&self) -> Result<Vec<Contact>, Error>;

    /// Fetch one contact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] when no contact has the
    /// given id.
    async fn get(&self, id: ContactId) -> Result<Contact, Error>;
}
