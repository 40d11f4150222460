//! Request-level error mapping.
//!
//! Failure causes stay distinguishable on the wire: validation problems are
//! a client error with per-field detail, a missing identifier is 404, and
//! everything else is a generic 500. Raw internal error text is logged
//! server-side, never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::export::ExportError;
use crate::store::StoreError;
use crate::validate::FieldError;

/// A request-level failure, ready to be rendered as a response.
#[derive(Debug)]
pub enum ApiError {
    /// The payload failed validation before reaching the store.
    Validation(Vec<FieldError>),

    /// The addressed contact does not exist.
    NotFound {
        /// Identifier that matched nothing.
        id: i64,
    },

    /// Store or encoder failure. Detail was already logged.
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            StoreError::Database(db_err) => {
                error!(error = %db_err, "store operation failed");
                Self::Internal
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        error!(error = %err, "spreadsheet encoding failed");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation failed", "fields": fields })),
            )
                .into_response(),
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("contact {id} not found") })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response(),
        }
    }
}
