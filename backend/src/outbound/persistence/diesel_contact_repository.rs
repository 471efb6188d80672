//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Each operation checks out one pooled connection and runs a single
//! statement. `update` follows its write with a read of the same row so the
//! caller sees what storage actually holds.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{Contact, ContactChanges, ContactId, NewContact};

use super::models::{ContactRow, ContactUpdate, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to contact persistence errors.
///
/// Unique violations keep the constraint name reported by PostgreSQL so the
/// domain can tell which column collided.
fn map_diesel_error(error: diesel::result::Error) -> ContactPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ContactPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => ContactPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ContactPersistenceError::unique_violation(
                info.constraint_name().unwrap_or_default(),
                info.message(),
            )
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => ContactPersistenceError::connection("database connection error"),
        DieselError::DatabaseError(_, info) => ContactPersistenceError::query(info.message()),
        _ => ContactPersistenceError::query("database error"),
    }
}

/// Convert a domain id to the column type.
///
/// Ids beyond `i64::MAX` cannot exist in a `BIGSERIAL` column, so callers
/// treat `None` as "no such row".
fn row_id(id: ContactId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactPersistenceError> {
    let id = u64::try_from(row.id).map_err(|_| {
        ContactPersistenceError::query(format!("negative contact id in database: {}", row.id))
    })?;
    Ok(Contact {
        id: ContactId::new(id),
        name: row.name,
        email: row.email,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn create(&self, contact: &NewContact) -> Result<Contact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewContactRow {
            name: contact.name.as_str(),
            email: contact.email.as_str(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_contact(row)
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::id.asc())
            .limit(limit)
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactPersistenceError> {
        let Some(id) = row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn update(
        &self,
        id: ContactId,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let Some(id) = row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ContactUpdate {
            name: changes.name.as_str(),
            email: changes.email.as_str(),
            updated_at: changes.updated_at,
        };

        let updated = diesel::update(contacts::table.find(id))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(contact_id = id, updated, "contact update executed");

        let row: Option<ContactRow> = contacts::table
            .find(id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn delete(&self, id: ContactId) -> Result<usize, ContactPersistenceError> {
        let Some(id) = row_id(id) else {
            return Ok(0);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(contacts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for error mapping and id conversion; queries are
    //! exercised against embedded PostgreSQL in `tests/`.

    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct StubInfo {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("contacts")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &'static str,
        constraint: Option<&'static str>,
    ) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo { message, constraint }))
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"contacts_email_key\"",
            Some("contacts_email_key"),
        ));
        assert_eq!(
            err,
            ContactPersistenceError::unique_violation(
                "contacts_email_key",
                "duplicate key value violates unique constraint \"contacts_email_key\"",
            )
        );
    }

    #[rstest]
    fn unique_violation_without_constraint_uses_empty_name() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate email",
            None,
        ));
        assert!(matches!(
            err,
            ContactPersistenceError::UniqueViolation { ref constraint, .. } if constraint.is_empty()
        ));
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection)]
    #[case(DatabaseErrorKind::UnableToSendCommand)]
    fn connection_kinds_map_to_connection(#[case] kind: DatabaseErrorKind) {
        let err = map_diesel_error(database_error(kind, "gone", None));
        assert!(matches!(err, ContactPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert!(matches!(
            map_diesel_error(DieselError::NotFound),
            ContactPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ContactPersistenceError::connection("timed out"));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(42, Some(42))]
    #[case(u64::MAX, None)]
    fn row_id_rejects_values_outside_bigint(#[case] raw: u64, #[case] expected: Option<i64>) {
        assert_eq!(row_id(ContactId::new(raw)), expected);
    }

    #[rstest]
    fn negative_row_ids_are_rejected() {
        let now = Utc::now();
        let row = ContactRow {
            id: -1,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            created_at: now,
            updated_at: now,
        };
        assert!(row_to_contact(row).is_err());
    }
}
