//! HTTP error mapping.
//!
//! [`ApiError`] is what every handler returns on failure. Core errors map to
//! a status code by variant; validation failures carry the full list of
//! field errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use social_graph_core::Error as CoreError;
use thiserror::Error;

use crate::handlers::helpers::{internal_error, unavailable_error};
use crate::types::{ErrorResponse, FieldError, ValidationErrorResponse};

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A core operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request did not pass validation.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
}

impl ApiError {
    /// Builds a validation error for a single field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

/// HTTP status for a core error.
#[must_use]
pub fn status_for(err: &CoreError) -> StatusCode {
    match err {
        CoreError::VertexNotFound(_) | CoreError::EdgeNotFound(..) => StatusCode::NOT_FOUND,
        CoreError::SelfConnection(_) => StatusCode::BAD_REQUEST,
        CoreError::EdgeAlreadyExists(..) | CoreError::UserAlreadyExists(_) => StatusCode::CONFLICT,
        CoreError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    error: "Validation failed".to_string(),
                    details,
                }),
            )
                .into_response(),
            Self::Core(err @ CoreError::StoreUnavailable(_)) => {
                unavailable_error(&err).into_response()
            }
            Self::Core(err @ CoreError::Config(_)) => internal_error("Request", &err).into_response(),
            Self::Core(err) => {
                tracing::debug!(code = err.code(), error = %err, "Request rejected");
                (
                    status_for(&err),
                    Json(ErrorResponse {
                        status: "fail".to_string(),
                        message: err.to_string(),
                        code: err.code().to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
