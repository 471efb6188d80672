//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Contacts table.
    ///
    /// `email` carries the `contacts_email_key` unique constraint.
    contacts (id) {
        /// Primary key generated by `BIGSERIAL`.
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
