//! HTTP handlers for the social graph REST API.
//!
//! - `health`: service info, health check, OpenAPI document, 404 fallback
//! - `users`: registration, lookup, friends, friends-of-friends
//! - `connections`: add/remove edges, list edges, degree of separation

pub mod connections;
pub mod health;
pub mod helpers;
pub mod users;

pub use connections::{add_connection, degree_of_separation, list_connections, remove_connection};
pub use health::{fallback, health_check, openapi_json, service_info};
pub use users::{create_user, get_friends, get_friends_of_friends, get_user, list_users};
