//! Service info, health check, OpenAPI document and the 404 fallback.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::types::HealthResponse;
use crate::{ApiDoc, AppState};

/// Routes advertised by `GET /` and the 404 fallback.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /health",
    "GET /api-docs/openapi.json",
    "POST /api/users",
    "GET /api/users",
    "GET /api/users/{user_str_id}",
    "GET /api/users/{user_str_id}/friends",
    "GET /api/users/{user_str_id}/friends-of-friends",
    "POST /api/connections",
    "DELETE /api/connections",
    "GET /api/connections",
    "GET /api/connections/degree",
];

/// Service info and endpoint list.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service info", body = Object))
)]
pub async fn service_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Social Connections API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": AVAILABLE_ENDPOINTS,
        "documentation": "/api-docs/openapi.json",
        "status": "Server is running"
    }))
}

/// Health check. Returns 503 when the store does not answer a ping.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "disconnected")
        }
    };

    (
        status,
        Json(HealthResponse {
            uptime_secs: state.started_at.elapsed().as_secs(),
            message: "Server is running".to_string(),
            database: database.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// The OpenAPI document for this server.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// 404 for any unmatched route.
pub async fn fallback(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!(%method, %uri, "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Endpoint not found",
            "message": format!("The endpoint {method} {uri} does not exist"),
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
