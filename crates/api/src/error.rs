//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side faults to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Client faults (validation failures, unresolvable zip codes, missing
//! records) carry enough detail for the user to correct their input; server
//! faults (store or geocoding failures) respond with generic messages so
//! collaborator internals never leak.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::enrich::EnrichError;
use crate::store::StoreError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Enrichment workflow failed.
    #[error("Enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Referenced record is absent.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    /// Whether this error is a server-side fault worth reporting.
    const fn is_server_fault(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Enrich(EnrichError::Upstream(_)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Enrich(EnrichError::Validation(_) | EnrichError::UnresolvableZip(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Enrich(EnrichError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose collaborator details to clients
        let message = match &self {
            Self::Enrich(
                err @ (EnrichError::Validation(_) | EnrichError::UnresolvableZip(_)),
            ) => err.to_string(),
            Self::Enrich(EnrichError::Upstream(_)) => {
                "Geocoding service unavailable".to_string()
            }
            Self::Store(_) => "Internal server error".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
