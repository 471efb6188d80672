//! Domain primitives, services, and ports.
//!
//! Purpose: define the contact entity, its normalisation and validation
//! rules, and the use-case service that sequences persistence. Nothing here
//! depends on the HTTP framework or the database driver.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Contact / ContactDraft / ContactId: the contact record and client input.
//! - ContactService: implements the `ContactsCommand` and `ContactsQuery`
//!   driving ports.

pub mod contact;
pub mod contact_error_formatting;
pub mod contact_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::contact::{
    CONTACT_LIST_LIMIT, Contact, ContactChanges, ContactDraft, ContactId,
    ContactValidationError, NewContact, is_valid_email,
};
pub use self::contact_error_formatting::{
    EMAIL_TAKEN_MESSAGE, format_write_error, map_persistence_error,
};
pub use self::contact_service::{CONTACT_NOT_FOUND_MESSAGE, ContactService};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use contacts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Contact Not Found"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
