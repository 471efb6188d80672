//! Contact data model.
//!
//! A [`ContactDraft`] is what clients submit: it is normalised on construction
//! (trimmed, then HTML-escaped) and validated before it reaches persistence.
//! [`Contact`] is the stored record, always carrying a database-assigned id.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of rows returned by a list request.
pub const CONTACT_LIST_LIMIT: usize = 100;

/// Validation errors returned by [`ContactDraft::validate`].
///
/// The `Display` text is the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    RequiredName,
    RequiredEmail,
    InvalidEmail,
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredName => write!(f, "Required Name"),
            Self::RequiredEmail => write!(f, "Required Email"),
            Self::InvalidEmail => write!(f, "Invalid Email"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Database-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` when `email` is a syntactically valid `local@domain`
/// address.
///
/// # Examples
/// ```
/// use contacts::domain::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("ada.example.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn normalize_field(raw: &str) -> String {
    html_escape::encode_quoted_attribute(raw.trim()).into_owned()
}

/// Client-submitted contact fields after normalisation.
///
/// ## Invariants
/// - `name` and `email` have no surrounding whitespace and are HTML-escaped.
/// - A draft carries no id and no timestamps; both are server controlled.
///
/// # Examples
/// ```
/// use contacts::domain::ContactDraft;
///
/// let draft = ContactDraft::new("  Ada <Lovelace> ", " ada@example.com ");
/// assert_eq!(draft.name(), "Ada &lt;Lovelace&gt;");
/// assert_eq!(draft.email(), "ada@example.com");
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    email: String,
}

impl ContactDraft {
    /// Normalise raw input into a draft.
    pub fn new(name: impl AsRef<str>, email: impl AsRef<str>) -> Self {
        Self {
            name: normalize_field(name.as_ref()),
            email: normalize_field(email.as_ref()),
        }
    }

    /// Check the draft, reporting the first failing rule.
    ///
    /// Rules run in order: name present, email present, email well formed.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.is_empty() {
            return Err(ContactValidationError::RequiredName);
        }
        if self.email.is_empty() {
            return Err(ContactValidationError::RequiredEmail);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stamp the draft for insertion.
    pub fn into_new_contact(self, now: DateTime<Utc>) -> NewContact {
        NewContact {
            name: self.name,
            email: self.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp the draft as changes to an existing contact.
    pub fn into_changes(self, now: DateTime<Utc>) -> ContactChanges {
        ContactChanges {
            name: self.name,
            email: self.email,
            updated_at: now,
        }
    }
}

/// Fields written when inserting a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written when updating a contact. `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChanges {
    pub name: String,
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

/// Stored contact.
///
/// ## Invariants
/// - `id` is assigned by storage and never taken from client input.
/// - `created_at` is fixed at insertion; `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
