//! Read-side queries: degree of separation, friends, friends-of-friends.
//!
//! Every query checks that its vertices exist, then builds a fresh
//! [`GraphSnapshot`] from the full edge list and traverses it. Nothing is
//! cached between calls, so a query always observes the edges committed
//! before its snapshot was read.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::traversal::{
    degree_of_separation, direct_neighbors, second_degree_neighbors, Separation,
};
use crate::graph::{GraphSnapshot, UserId};
use crate::store::EdgeStore;

/// Degree of separation as exposed to callers.
///
/// `degree` is -1 and `message` is `"not_connected"` when no path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    /// Path length in edges, or -1.
    pub degree: i64,
    /// Set only when the users are not connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<Separation> for DegreeResult {
    fn from(separation: Separation) -> Self {
        Self {
            degree: separation.as_i64(),
            message: (!separation.is_connected()).then_some(Separation::NOT_CONNECTED_MESSAGE),
        }
    }
}

/// A user in a neighborhood listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendRecord {
    /// User id.
    pub user_str_id: UserId,
    /// Display name.
    pub display_name: String,
}

/// Answers graph queries over a per-call snapshot.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn EdgeStore>,
}

impl QueryService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self { store }
    }

    /// Shortest-path length between `from` and `to`.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either user is absent. An unreachable target is
    /// not an error.
    pub async fn degree(&self, from: &UserId, to: &UserId) -> Result<DegreeResult> {
        self.require_vertex(from).await?;
        self.require_vertex(to).await?;

        let snapshot = self.snapshot().await?;
        let separation = degree_of_separation(&snapshot, from, to);
        debug!(%from, %to, degree = separation.as_i64(), "Computed degree of separation");
        Ok(separation.into())
    }

    /// Users at distance exactly 1 from `of`, ordered by display name.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `of` is absent.
    pub async fn friends(&self, of: &UserId) -> Result<Vec<FriendRecord>> {
        self.require_vertex(of).await?;
        let snapshot = self.snapshot().await?;
        self.shape(direct_neighbors(&snapshot, of)).await
    }

    /// Users at distance exactly 2 from `of`, ordered by display name.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if `of` is absent.
    pub async fn friends_of_friends(&self, of: &UserId) -> Result<Vec<FriendRecord>> {
        self.require_vertex(of).await?;
        let snapshot = self.snapshot().await?;
        self.shape(second_degree_neighbors(&snapshot, of)).await
    }

    async fn require_vertex(&self, id: &UserId) -> Result<()> {
        if self.store.vertex_exists(id).await? {
            Ok(())
        } else {
            Err(Error::VertexNotFound(id.to_string()))
        }
    }

    async fn snapshot(&self) -> Result<GraphSnapshot> {
        let edges = self.store.list_all_edges().await?;
        Ok(GraphSnapshot::build(edges))
    }

    async fn shape(&self, ids: BTreeSet<&UserId>) -> Result<Vec<FriendRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<UserId> = ids.into_iter().cloned().collect();
        let mut records: Vec<FriendRecord> = self
            .store
            .users_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| FriendRecord {
                user_str_id: u.user_str_id,
                display_name: u.display_name,
            })
            .collect();
        records.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.user_str_id.cmp(&b.user_str_id))
        });
        Ok(records)
    }
}
