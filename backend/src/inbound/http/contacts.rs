//! Contact HTTP handlers.
//!
//! ```text
//! GET    /contacts
//! POST   /contacts       {"name":"Ada Lovelace","email":"ada@example.com"}
//! GET    /contacts/{id}
//! PUT    /contacts/{id}  {"name":"Ada King","email":"ada@example.com"}
//! DELETE /contacts/{id}
//! ```
//!
//! Each handler runs a short pipeline with early exit: extract the path id
//! (400 on failure), decode the body (422), normalise and validate (422),
//! then call the driving port and map its result.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Contact, ContactDraft, ContactId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Route name used to build `Location` headers.
pub const GET_CONTACT_ROUTE: &str = "get_contact";

/// Header carrying the id of a deleted contact.
pub const ENTITY_HEADER: &str = "Entity";

/// Request body for create and update.
///
/// Only `name` and `email` are read. Missing fields decode as empty strings
/// so validation can name them; any other field, including `id` and the
/// timestamps, is ignored.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl ContactRequest {
    /// Normalise then validate the submitted fields.
    fn into_draft(self) -> Result<ContactDraft, Error> {
        let draft = ContactDraft::new(&self.name, &self.email);
        draft
            .validate()
            .map_err(|err| Error::validation_failed(err.to_string()))?;
        Ok(draft)
    }
}

/// Contact as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            email: value.email,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// List up to 100 contacts.
#[utoipa::path(
    get,
    path = "/contacts",
    responses(
        (status = 200, description = "Contacts ordered by id", body = [ContactResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state.contacts_query.list().await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/contacts",
    request_body = ContactRequest,
    responses(
        (
            status = 201,
            description = "Contact created",
            headers(("Location" = String, description = "URL of the new contact")),
            body = ContactResponse
        ),
        (status = 422, description = "Undecodable body or failed validation", body = ErrorSchema),
        (status = 500, description = "Email already taken or storage failure", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let contact = state.contacts.create(draft).await?;
    let location = req
        .url_for(GET_CONTACT_ROUTE, [contact.id.to_string()])
        .map_err(|err| Error::internal(format!("failed to build contact location: {err}")))?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.to_string()))
        .json(ContactResponse::from(contact)))
}

/// Fetch one contact.
#[utoipa::path(
    get,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 400, description = "Malformed id or no such contact", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}", name = "get_contact")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = ContactId::new(path.into_inner());
    let contact = state.contacts_query.get(id).await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Replace a contact's name and email.
#[utoipa::path(
    put,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 422, description = "Undecodable body or failed validation", body = ErrorSchema),
        (status = 500, description = "Email already taken, no such contact, or storage failure", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = ContactId::new(path.into_inner());
    let draft = payload.into_inner().into_draft()?;
    let contact = state.contacts.update(id, draft).await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Delete a contact.
///
/// Responds 204 whether or not a row was removed.
#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    params(("id" = u64, Path, description = "Contact id")),
    responses(
        (
            status = 204,
            description = "Contact deleted or already absent",
            headers(("Entity" = String, description = "Id from the request path"))
        ),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = ContactId::new(path.into_inner());
    state.contacts.delete(id).await?;
    Ok(HttpResponse::NoContent()
        .insert_header((ENTITY_HEADER, id.to_string()))
        .finish())
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
