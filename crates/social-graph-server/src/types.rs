//! Request and response types for the REST API.
//!
//! Request fields are optional at the serde level so that a missing field is
//! reported by validation alongside every other failure, instead of being
//! rejected by the JSON extractor on its own.

use serde::{Deserialize, Serialize};
use social_graph_core::{ConnectionRecord, DegreeResult, FriendRecord, User};
use utoipa::{IntoParams, ToSchema};

// ── Requests ───────────────────────────────────────────────────────────

/// Request to register a user.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Alphanumeric id, 3 to 50 characters.
    #[serde(default)]
    pub user_str_id: Option<String>,
    /// Display name, 1 to 100 characters.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Optional email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for adding or removing a connection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConnectionRequest {
    /// First user.
    #[serde(default)]
    pub user1_str_id: Option<String>,
    /// Second user.
    #[serde(default)]
    pub user2_str_id: Option<String>,
}

/// Query parameters for the degree-of-separation endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DegreeQuery {
    /// Source user.
    pub from_user_str_id: Option<String>,
    /// Target user.
    pub to_user_str_id: Option<String>,
}

// ── Responses ──────────────────────────────────────────────────────────

/// A registered user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User id.
    pub user_str_id: String,
    /// Display name.
    pub display_name: String,
    /// Email, if provided at registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Registration time, unix seconds.
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_str_id: user.user_str_id.into_string(),
            display_name: user.display_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// A user in a friends or friends-of-friends listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendResponse {
    /// User id.
    pub user_str_id: String,
    /// Display name.
    pub display_name: String,
}

impl From<FriendRecord> for FriendResponse {
    fn from(record: FriendRecord) -> Self {
        Self {
            user_str_id: record.user_str_id.into_string(),
            display_name: record.display_name,
        }
    }
}

/// A stored connection with both display names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionResponse {
    /// Store-assigned id.
    pub id: i64,
    /// Canonically smaller endpoint.
    pub user1_str_id: String,
    /// Display name of the first endpoint.
    pub user1_name: String,
    /// Canonically larger endpoint.
    pub user2_str_id: String,
    /// Display name of the second endpoint.
    pub user2_name: String,
    /// Creation time, unix seconds.
    pub created_at: i64,
}

impl From<ConnectionRecord> for ConnectionResponse {
    fn from(record: ConnectionRecord) -> Self {
        Self {
            id: record.id,
            user1_str_id: record.user1_str_id.into_string(),
            user1_name: record.user1_name,
            user2_str_id: record.user2_str_id.into_string(),
            user2_name: record.user2_name,
            created_at: record.created_at,
        }
    }
}

/// Degree of separation. `degree` is -1 with `message = "not_connected"` when
/// no path exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DegreeResponse {
    /// Path length in edges, or -1.
    pub degree: i64,
    /// Present only when the users are not connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<DegreeResult> for DegreeResponse {
    fn from(result: DegreeResult) -> Self {
        Self {
            degree: result.degree,
            message: result.message.map(str::to_string),
        }
    }
}

/// Outcome of a connection mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `connection_added` or `connection_removed`.
    pub status: String,
}

/// Health check payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Human-readable status.
    pub message: String,
    /// `connected` or `disconnected`.
    pub database: String,
    /// Server version.
    pub version: String,
}

/// Error payload for domain and internal failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// `fail` for client errors, `error` for server errors.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code, e.g. `USER_NOT_FOUND`.
    pub code: String,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Offending field name.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

/// Error payload for request validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Always `Validation failed`.
    pub error: String,
    /// Every failed check.
    pub details: Vec<FieldError>,
}
