//! Connection handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::types::{
    ConnectionRequest, ConnectionResponse, DegreeQuery, DegreeResponse, ErrorResponse,
    StatusResponse, ValidationErrorResponse,
};
use crate::validation::{validate_connection, validate_degree_query};
use crate::AppState;

fn parse_body(
    body: Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<ConnectionRequest, ApiError> {
    body.map(|Json(request)| request)
        .map_err(|e| ApiError::invalid("body", e.body_text()))
}

/// Connect two users.
#[utoipa::path(
    post,
    path = "/api/connections",
    tag = "connections",
    request_body = ConnectionRequest,
    responses(
        (status = 201, description = "Connection added", body = StatusResponse),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Connection already exists", body = ErrorResponse)
    )
)]
pub async fn add_connection(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let request = parse_body(body)?;
    let (a, b) = validate_connection(&request)?;
    state.connections.connect(&a, &b).await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "connection_added".to_string(),
        }),
    ))
}

/// Remove the connection between two users.
#[utoipa::path(
    delete,
    path = "/api/connections",
    tag = "connections",
    request_body = ConnectionRequest,
    responses(
        (status = 200, description = "Connection removed", body = StatusResponse),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "User or connection not found", body = ErrorResponse)
    )
)]
pub async fn remove_connection(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let request = parse_body(body)?;
    let (a, b) = validate_connection(&request)?;
    state.connections.disconnect(&a, &b).await?;
    Ok(Json(StatusResponse {
        status: "connection_removed".to_string(),
    }))
}

/// List every connection with display names, newest first.
#[utoipa::path(
    get,
    path = "/api/connections",
    tag = "connections",
    responses(
        (status = 200, description = "All connections", body = [ConnectionResponse]),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn list_connections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ConnectionResponse>>, ApiError> {
    let records = state.connections.list().await?;
    Ok(Json(
        records.into_iter().map(ConnectionResponse::from).collect(),
    ))
}

/// Degree of separation between two users.
#[utoipa::path(
    get,
    path = "/api/connections/degree",
    tag = "connections",
    params(DegreeQuery),
    responses(
        (status = 200, description = "Degree, or -1 when not connected", body = DegreeResponse),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn degree_of_separation(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DegreeQuery>, QueryRejection>,
) -> Result<Json<DegreeResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid("query", e.body_text()))?;
    let (from, to) = validate_degree_query(&query)?;
    let result = state.queries.degree(&from, &to).await?;
    Ok(Json(result.into()))
}
