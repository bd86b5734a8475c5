//! Shared handler helpers.
//!
//! Server-side failures are logged in full and answered with a generic
//! message, so store errors and internal state never reach API consumers.

use axum::{http::StatusCode, Json};

use crate::types::ErrorResponse;

/// Build an internal server error response without leaking implementation details.
pub fn internal_error(
    context: &str,
    err: &dyn std::fmt::Display,
) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(%context, error = %err, "Internal server error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: format!("{context}: internal error"),
            code: "INTERNAL_ERROR".to_string(),
        }),
    )
}

/// Build a 503 response for an unreachable store.
pub fn unavailable_error(err: &dyn std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(error = %err, "Store unavailable");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: "Database unavailable. Please try again later.".to_string(),
            code: "DATABASE_UNAVAILABLE".to_string(),
        }),
    )
}
