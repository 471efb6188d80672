//! Translate contact persistence failures into domain errors.
//!
//! Writes go through [`format_write_error`], which recognises email
//! uniqueness violations. Reads and deletes use [`map_persistence_error`].

use crate::domain::Error;
use crate::domain::ports::ContactPersistenceError;

/// Message returned when a write collides with an existing email address.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email Already Taken";

fn refers_to_email(constraint: &str, message: &str) -> bool {
    if constraint.is_empty() {
        message.to_ascii_lowercase().contains("email")
    } else {
        constraint.to_ascii_lowercase().contains("email")
    }
}

/// Map a storage failure from create or update into a client-facing error.
///
/// # Examples
/// ```
/// use contacts::domain::ports::ContactPersistenceError;
/// use contacts::domain::{ErrorCode, format_write_error};
///
/// let err = format_write_error(ContactPersistenceError::unique_violation(
///     "contacts_email_key",
///     "duplicate key value",
/// ));
/// assert_eq!(err.code(), ErrorCode::DuplicateEntry);
/// assert_eq!(err.message(), "Email Already Taken");
/// ```
pub fn format_write_error(error: ContactPersistenceError) -> Error {
    match error {
        ContactPersistenceError::UniqueViolation {
            ref constraint,
            ref message,
        } if refers_to_email(constraint, message) => Error::duplicate_entry(EMAIL_TAKEN_MESSAGE),
        other => map_persistence_error(other),
    }
}

/// Map a storage failure into an internal error carrying the raw detail.
///
/// The detail is logged by the HTTP adapter and never returned to clients.
pub fn map_persistence_error(error: ContactPersistenceError) -> Error {
    Error::internal(error.to_string())
}
