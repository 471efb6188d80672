//! HTTP inbound adapter exposing REST endpoints.

pub mod contacts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Register extractor configuration, contact routes and health probes.
///
/// Callers provide [`state::HttpState`] and [`health::HealthState`] as
/// `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(error::json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
    .service(contacts::list_contacts)
    .service(contacts::create_contact)
    .service(contacts::get_contact)
    .service(contacts::update_contact)
    .service(contacts::delete_contact)
    .service(health::ready)
    .service(health::live);
}
