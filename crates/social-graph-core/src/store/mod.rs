//! Edge store abstraction.
//!
//! The store is the only shared mutable resource in the service. It owns the
//! user table and the canonical edge table; the graph layer only ever reads
//! the full edge list from it.
//!
//! Uniqueness of the canonical pair is enforced by the store itself, so two
//! concurrent `connect` calls for the same pair cannot both succeed: the
//! loser receives `Error::EdgeAlreadyExists`.

mod memory;
mod sqlite;


use async_trait::async_trait;

use crate::error::Result;
use crate::graph::{CanonicalPair, Connection, NewUser, User, UserId};

pub use memory::InMemoryEdgeStore;
pub use sqlite::SqliteEdgeStore;

/// Durable storage for users and canonical edges.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait EdgeStore: Send + Sync {
    // ── Vertices ───────────────────────────────────────────────────────

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// `Error::UserAlreadyExists` if the id is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Looks up a user by id.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Returns true if a user with this id is registered.
    async fn vertex_exists(&self, id: &UserId) -> Result<bool>;

    /// Returns the users whose ids are in `ids`, in no particular order.
    /// Unknown ids are skipped.
    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>>;

    /// Returns every user, newest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    // ── Edges ──────────────────────────────────────────────────────────

    /// Returns every stored edge as `(first, second)` in canonical order.
    /// Full scan, no pagination.
    async fn list_all_edges(&self) -> Result<Vec<(UserId, UserId)>>;

    /// Looks up the stored edge for `pair`.
    async fn find_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>>;

    /// Stores the edge for `pair`.
    ///
    /// # Errors
    ///
    /// `Error::EdgeAlreadyExists` on a uniqueness violation and
    /// `Error::VertexNotFound` if an endpoint is not registered.
    async fn insert_edge(&self, pair: &CanonicalPair) -> Result<Connection>;

    /// Removes the edge for `pair`, returning it, or `None` if absent.
    async fn delete_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>>;

    /// Returns every stored edge record, newest first.
    async fn list_connections(&self) -> Result<Vec<Connection>>;

    // ── Health ─────────────────────────────────────────────────────────

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// `Error::StoreUnavailable` if it is not.
    async fn ping(&self) -> Result<()>;
}

/// Current time as unix seconds.
pub(crate) fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
