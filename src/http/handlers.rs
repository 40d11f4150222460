//! Request handlers.
//!
//! Each handler is a stateless request/response pair. The create path
//! persists first, then dispatches the welcome notification on a detached
//! task — a notification failure is logged and does not fail the request.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::Json;
use tracing::{info, warn};

use crate::export;
use crate::notify;
use crate::store::{Contact, ContactDraft};
use crate::validate::validate_draft;

use super::error::ApiError;
use super::AppState;

/// MIME type of an XLSX workbook.
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download filename for the export endpoint.
const XLSX_DISPOSITION: &str = "attachment; filename=\"contacts.xlsx\"";

/// `GET /api/contacts` — the full contact collection, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.store.list().await?;
    Ok(Json(contacts))
}

/// `GET /api/contacts/export` — the contact collection as an XLSX download.
pub async fn export(State(state): State<AppState>) -> Result<(HeaderMap, Vec<u8>), ApiError> {
    let contacts = state.store.list().await?;
    let bytes = export::write_workbook(&contacts)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static(XLSX_DISPOSITION),
    );
    Ok((headers, bytes))
}

/// `POST /api/contacts` — validate, persist, then send the welcome mail.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> Result<&'static str, ApiError> {
    validate_draft(&draft).map_err(ApiError::Validation)?;

    let contact = state.store.create(draft).await?;
    info!(id = contact.id, "contact created");

    // Persistence and notification are independent effects: the row is
    // committed, so a delivery failure must not fail the request.
    let notification = notify::welcome(&contact);
    let mailer = Arc::clone(&state.mailer);
    tokio::spawn(async move {
        if let Err(err) = mailer.send(&notification).await {
            warn!(error = %err, to = %notification.to, "welcome mail failed");
        }
    });

    Ok("ok")
}

/// `PUT /api/contacts` — full-record replace, addressed by the payload's id.
pub async fn update(
    State(state): State<AppState>,
    Json(contact): Json<Contact>,
) -> Result<&'static str, ApiError> {
    validate_draft(&ContactDraft::from(&contact)).map_err(ApiError::Validation)?;

    state.store.update(&contact).await?;
    info!(id = contact.id, "contact updated");
    Ok("ok")
}

/// `DELETE /api/contacts/{id}` — delete by id; 404 when the id is unknown.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    state.store.delete(id).await?;
    info!(id, "contact deleted");
    Ok("ok")
}
