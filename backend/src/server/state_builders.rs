//! Builders for HTTP state backed by a contact repository.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use contacts::domain::ContactService;
use contacts::domain::ports::ContactRepository;
use contacts::inbound::http::state::HttpState;
use contacts::outbound::persistence::{DbPool, DieselContactRepository};

/// Wire one [`ContactService`] into both driving ports.
fn http_state_for<R>(repository: Arc<R>, clock: Arc<dyn Clock>) -> web::Data<HttpState>
where
    R: ContactRepository + 'static,
{
    let service = Arc::new(ContactService::new(repository, clock));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// HTTP state over the PostgreSQL repository and the system clock.
pub(super) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    http_state_for(
        Arc::new(DieselContactRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    )
}
