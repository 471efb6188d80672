//! Port abstraction for contact persistence adapters.

use async_trait::async_trait;

use crate::domain::{Contact, ContactChanges, ContactId, NewContact};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { constraint: String, message: String } =>
            "contact repository unique constraint {constraint} violated: {message}",
    }
}

/// Port for reading and writing contacts.
///
/// Every method is a single statement against storage, except
/// [`ContactRepository::update`] which re-reads the row after writing it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a contact and return the stored row with its generated id.
    ///
    /// A duplicate email yields [`ContactPersistenceError::UniqueViolation`].
    async fn create(&self, contact: &NewContact) -> Result<Contact, ContactPersistenceError>;

    /// Return at most `limit` contacts ordered by id.
    async fn find_all(&self, limit: usize) -> Result<Vec<Contact>, ContactPersistenceError>;

    /// Fetch one contact; `None` when no row matches.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Apply `changes` to the row and return its stored state.
    ///
    /// Returns `None` when no row matches `id`.
    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Hard-delete a contact, returning the number of rows removed.
    async fn delete(&self, id: ContactId) -> Result<usize, ContactPersistenceError>;
}
