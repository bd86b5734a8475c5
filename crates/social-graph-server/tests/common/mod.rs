//! Shared helpers for server integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use social_graph_core::{InMemoryEdgeStore, RateLimitConfig, SocialGraphConfig};
use social_graph_server::{build_app, AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Config with rate limiting disabled.
pub fn test_config() -> SocialGraphConfig {
    SocialGraphConfig {
        rate_limit: RateLimitConfig {
            max_requests: 0,
            window_secs: 60,
        },
        ..SocialGraphConfig::default()
    }
}

/// Full application over a fresh in-memory store.
pub fn create_test_app() -> Router {
    create_test_app_with(&test_config())
}

/// Full application over a fresh in-memory store with the given config.
pub fn create_test_app_with(config: &SocialGraphConfig) -> Router {
    let state = Arc::new(AppState::new(Arc::new(InMemoryEdgeStore::new())));
    build_app(state, config)
}

/// Sends one request and returns the status and parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Invalid JSON")
    };
    (status, json)
}

/// Registers a user and asserts success.
pub async fn create_user(app: &Router, id: &str, name: &str) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users",
        Some(serde_json::json!({ "user_str_id": id, "display_name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create {id}: {body}");
}

/// Connects two users and asserts success.
pub async fn connect(app: &Router, a: &str, b: &str) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/connections",
        Some(serde_json::json!({ "user1_str_id": a, "user2_str_id": b })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "connect {a}-{b}: {body}");
}
