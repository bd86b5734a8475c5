//! REST API for the social graph service.
//!
//! The binary in `main.rs` wires configuration, tracing and the listener;
//! everything needed to build the router lives here so integration tests
//! can drive it in-process.

#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod types;
pub mod validation;

use axum::{routing::get, Extension, Router};
use social_graph_core::{
    ConnectionService, CorsConfig, EdgeStore, QueryService, SocialGraphConfig, UserService,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use error::ApiError;
pub use handlers::{
    add_connection, create_user, degree_of_separation, fallback, get_friends,
    get_friends_of_friends, get_user, health_check, list_connections, list_users, openapi_json,
    remove_connection, service_info,
};
pub use middleware::{rate_limit_middleware, RateLimiterState};

/// Shared state handed to every handler.
pub struct AppState {
    /// User registration and lookup.
    pub users: UserService,
    /// Edge mutation.
    pub connections: ConnectionService,
    /// Graph queries.
    pub queries: QueryService,
    /// The backing store, for health checks.
    pub store: Arc<dyn EdgeStore>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Builds the services over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            connections: ConnectionService::new(store.clone()),
            queries: QueryService::new(store.clone()),
            store,
            started_at: Instant::now(),
        }
    }
}

/// OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Graph API",
        description = "Users, friendships, and degree-of-separation queries"
    ),
    paths(
        handlers::health::service_info,
        handlers::health::health_check,
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::get_friends,
        handlers::users::get_friends_of_friends,
        handlers::connections::add_connection,
        handlers::connections::remove_connection,
        handlers::connections::list_connections,
        handlers::connections::degree_of_separation,
    ),
    components(schemas(
        types::CreateUserRequest,
        types::ConnectionRequest,
        types::UserResponse,
        types::FriendResponse,
        types::ConnectionResponse,
        types::DegreeResponse,
        types::StatusResponse,
        types::HealthResponse,
        types::ErrorResponse,
        types::FieldError,
        types::ValidationErrorResponse,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "users", description = "User registration and neighborhoods"),
        (name = "connections", description = "Friendship edges and degree of separation")
    )
)]
pub struct ApiDoc;

/// Build the `/api` routes. The rate limiter, when present, applies to these
/// routes only.
pub fn build_api_router(state: Arc<AppState>, limiter: Option<Arc<RateLimiterState>>) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{user_str_id}", get(get_user))
        .route("/api/users/{user_str_id}/friends", get(get_friends))
        .route(
            "/api/users/{user_str_id}/friends-of-friends",
            get(get_friends_of_friends),
        )
        .route(
            "/api/connections",
            get(list_connections)
                .post(add_connection)
                .delete(remove_connection),
        )
        .route("/api/connections/degree", get(degree_of_separation))
        .layer(
            ServiceBuilder::new()
                .layer(Extension(limiter))
                .layer(axum::middleware::from_fn(rate_limit_middleware)),
        )
        .with_state(state)
}

/// Build the CORS layer from configuration. An empty origin list is
/// permissive.
#[must_use]
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.origins.is_empty() {
        tracing::warn!("CORS: permissive (dev mode). Set cors.origins to restrict origins.");
        return CorsLayer::permissive();
    }

    let origin_list: Vec<_> = config
        .origins
        .iter()
        .filter_map(|o| match o.trim().parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "CORS: ignoring unparsable origin");
                None
            }
        })
        .collect();
    tracing::info!("CORS: restricted to {} origin(s)", origin_list.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin_list))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the complete application router.
pub fn build_app(state: Arc<AppState>, config: &SocialGraphConfig) -> Router {
    let limiter = RateLimiterState::from_config(&config.rate_limit);
    match &limiter {
        Some(l) => tracing::info!(
            max_requests = l.max_requests,
            window_secs = l.window_secs,
            "Rate limit enabled for /api routes"
        ),
        None => tracing::warn!("Rate limiting disabled"),
    }

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state.clone())
        .merge(build_api_router(state, limiter))
        .fallback(fallback)
        .layer(build_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}
