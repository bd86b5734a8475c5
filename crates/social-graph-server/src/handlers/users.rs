//! User handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::types::{
    CreateUserRequest, ErrorResponse, FriendResponse, UserResponse, ValidationErrorResponse,
};
use crate::validation::{validate_create_user, validate_user_param};
use crate::AppState;

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::invalid("body", e.body_text()))?;
    let new_user = validate_create_user(&request)?;
    let user = state.users.register(new_user).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List every user, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{user_str_id}",
    tag = "users",
    params(("user_str_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_str_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = validate_user_param(&user_str_id)?;
    let user = state.users.get(&id).await?;
    Ok(Json(user.into()))
}

/// Direct friends, ordered by display name.
#[utoipa::path(
    get,
    path = "/api/users/{user_str_id}/friends",
    tag = "users",
    params(("user_str_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Friends", body = [FriendResponse]),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_friends(
    State(state): State<Arc<AppState>>,
    Path(user_str_id): Path<String>,
) -> Result<Json<Vec<FriendResponse>>, ApiError> {
    let id = validate_user_param(&user_str_id)?;
    let friends = state.queries.friends(&id).await?;
    Ok(Json(friends.into_iter().map(FriendResponse::from).collect()))
}

/// Users exactly two hops away, ordered by display name.
#[utoipa::path(
    get,
    path = "/api/users/{user_str_id}/friends-of-friends",
    tag = "users",
    params(("user_str_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Friends of friends", body = [FriendResponse]),
        (status = 400, description = "Malformed id", body = ValidationErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_friends_of_friends(
    State(state): State<Arc<AppState>>,
    Path(user_str_id): Path<String>,
) -> Result<Json<Vec<FriendResponse>>, ApiError> {
    let id = validate_user_param(&user_str_id)?;
    let fof = state.queries.friends_of_friends(&id).await?;
    Ok(Json(fof.into_iter().map(FriendResponse::from).collect()))
}
