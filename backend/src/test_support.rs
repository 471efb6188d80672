//! Test utilities for the contacts crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{Contact, ContactChanges, ContactId, ContactService, NewContact};

/// Constraint name reported for duplicate emails, matching the migration.
pub const EMAIL_CONSTRAINT: &str = "contacts_email_key";

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for FixedClock {
    /// 2024-01-01T00:00:00Z.
    fn default() -> Self {
        Self::new(fixed_timestamp())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Instant used by [`FixedClock::default`].
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[derive(Debug, Default)]
struct Store {
    next_id: u64,
    rows: Vec<Contact>,
}

/// In-memory [`ContactRepository`] with the same uniqueness and ordering
/// rules as the PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    store: Mutex<Store>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row, ordered by id.
    pub fn rows(&self) -> Vec<Contact> {
        self.lock().map(|store| store.rows.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ContactPersistenceError> {
        self.store
            .lock()
            .map_err(|err| ContactPersistenceError::connection(err.to_string()))
    }
}

fn email_taken(store: &Store, email: &str, except: Option<ContactId>) -> bool {
    store
        .rows
        .iter()
        .any(|row| row.email == email && Some(row.id) != except)
}

fn duplicate_email(email: &str) -> ContactPersistenceError {
    ContactPersistenceError::unique_violation(
        EMAIL_CONSTRAINT,
        format!("duplicate key value violates unique constraint: email {email}"),
    )
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: &NewContact) -> Result<Contact, ContactPersistenceError> {
        let mut store = self.lock()?;
        if email_taken(&store, &contact.email, None) {
            return Err(duplicate_email(&contact.email));
        }
        store.next_id += 1;
        let stored = Contact {
            id: ContactId::new(store.next_id),
            name: contact.name.clone(),
            email: contact.email.clone(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };
        store.rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Contact>, ContactPersistenceError> {
        let store = self.lock()?;
        Ok(store.rows.iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactPersistenceError> {
        let store = self.lock()?;
        Ok(store.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut store = self.lock()?;
        if !store.rows.iter().any(|row| row.id == id) {
            return Ok(None);
        }
        if email_taken(&store, &changes.email, Some(id)) {
            return Err(duplicate_email(&changes.email));
        }
        let Some(row) = store.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        row.name.clone_from(&changes.name);
        row.email.clone_from(&changes.email);
        row.updated_at = changes.updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: ContactId) -> Result<usize, ContactPersistenceError> {
        let mut store = self.lock()?;
        let before = store.rows.len();
        store.rows.retain(|row| row.id != id);
        Ok(before - store.rows.len())
    }
}

/// Contact service over an empty in-memory repository and a fixed clock.
pub fn in_memory_service() -> (
    Arc<ContactService<InMemoryContactRepository>>,
    Arc<InMemoryContactRepository>,
) {
    let repository = Arc::new(InMemoryContactRepository::new());
    let service = Arc::new(ContactService::new(
        repository.clone(),
        Arc::new(FixedClock::default()),
    ));
    (service, repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactDraft;
    use rstest::rstest;

    fn new_contact(name: &str, email: &str) -> NewContact {
        ContactDraft::new(name, email).into_new_contact(fixed_timestamp())
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_and_emails_stay_unique() {
        let repo = InMemoryContactRepository::new();
        let first = repo
            .create(&new_contact("Ada", "ada@example.com"))
            .await
            .expect("first insert");
        let second = repo
            .create(&new_contact("Grace", "grace@example.com"))
            .await
            .expect("second insert");
        assert_eq!(first.id.get() + 1, second.id.get());

        let err = repo
            .create(&new_contact("Ada again", "ada@example.com"))
            .await
            .expect_err("duplicate email");
        assert!(matches!(
            err,
            ContactPersistenceError::UniqueViolation { ref constraint, .. }
                if constraint == EMAIL_CONSTRAINT
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn update_allows_keeping_own_email() {
        let repo = InMemoryContactRepository::new();
        let stored = repo
            .create(&new_contact("Ada", "ada@example.com"))
            .await
            .expect("insert");
        let changes = ContactDraft::new("Ada King", "ada@example.com").into_changes(Utc::now());

        let updated = repo
            .update(stored.id, &changes)
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.name, "Ada King");
        assert_eq!(updated.created_at, stored.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_rows_removed() {
        let repo = InMemoryContactRepository::new();
        let stored = repo
            .create(&new_contact("Ada", "ada@example.com"))
            .await
            .expect("insert");

        assert_eq!(repo.delete(stored.id).await.expect("delete"), 1);
        assert_eq!(repo.delete(stored.id).await.expect("delete again"), 0);
        assert!(repo.rows().is_empty());
    }
}
