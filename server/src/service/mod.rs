//! HTTP service over the records registry.
//!
//! - endpoints: handlers grouped by entity kind
//! - error: [`ApiError`] and its status-code mapping
//! - parsers: query strings and payloads that need conversion before storage
//!
//! Each handler performs exactly one repository call and echoes the
//! persisted record (or list of records) as JSON.

mod endpoints;
mod error;
mod parsers;

use axum::routing::post;
use axum::Router;
use records::Registry;

pub use error::ApiError;

/// Shared handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    registry: Registry,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

pub fn app(state: AppState) -> Router {
    use endpoints::{contacts, permits, residents, service_requests, tasks};

    Router::new()
        .route("/residents", post(residents::create).get(residents::list))
        .route(
            "/service-requests",
            post(service_requests::create).get(service_requests::list),
        )
        .route("/permits", post(permits::create).get(permits::list))
        .route("/permits/:id/decide", post(permits::decide))
        .route("/contacts", post(contacts::create).get(contacts::list))
        .route("/tasks", post(tasks::create).get(tasks::list))
        .with_state(state)
}
