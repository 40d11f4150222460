//! HTTP surface — router, handlers, and error mapping.
//!
//! The request handler layer is stateless orchestration: each request gets
//! its own task, validates input, calls the store gateway, and maps
//! failures to status-coded JSON. Dependencies (store, mailer) are passed
//! in explicitly via [`AppState`] — no ambient globals.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;

use crate::notify::Mailer;
use crate::store::ContactStore;

/// Shared per-request dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Contact store gateway.
    pub store: ContactStore,
    /// Outbound mail dispatch.
    pub mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Build the application router.
///
/// Routes:
/// - `GET /api/contacts` — list, newest first
/// - `POST /api/contacts` — create, then dispatch the welcome mail
/// - `PUT /api/contacts` — full-record update
/// - `DELETE /api/contacts/{id}` — delete by id
/// - `GET /api/contacts/export` — XLSX download
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/contacts",
            get(handlers::list)
                .post(handlers::create)
                .put(handlers::update),
        )
        .route("/api/contacts/export", get(handlers::export))
        .route("/api/contacts/{id}", delete(handlers::remove))
        .with_state(state)
}
