//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their JSON
//! shape and live in the inbound adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is not valid JSON for this endpoint.
    #[schema(rename = "invalid_payload")]
    InvalidPayload,
    /// The contact failed validation.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The path id is not an unsigned integer.
    #[schema(rename = "invalid_identifier")]
    InvalidIdentifier,
    /// No contact has the requested id.
    #[schema(rename = "not_found")]
    NotFound,
    /// The email is already taken.
    #[schema(rename = "duplicate_entry")]
    DuplicateEntry,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Required Name")]
    error: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}
