//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be tested without any I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactsCommand, ContactsQuery};

/// Dependency bundle for contact handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// A single service usually implements both:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use contacts::domain::ContactService;
    /// use contacts::inbound::http::state::HttpState;
    /// use contacts::outbound::persistence::{DbPool, DieselContactRepository};
    /// use mockable::DefaultClock;
    ///
    /// fn build(pool: DbPool) -> HttpState {
    ///     let service = Arc::new(ContactService::new(
    ///         Arc::new(DieselContactRepository::new(pool)),
    ///         Arc::new(DefaultClock),
    ///     ));
    ///     HttpState::new(service.clone(), service)
    /// }
    /// ```
    pub fn new(
        contacts: Arc<dyn ContactsCommand>,
        contacts_query: Arc<dyn ContactsQuery>,
    ) -> Self {
        Self {
            contacts,
            contacts_query,
        }
    }
}
