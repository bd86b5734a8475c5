//! Edge mutation with existence and canonical-order checks.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{CanonicalPair, Connection, UserId};
use crate::store::EdgeStore;

/// A stored connection joined with both endpoints' display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRecord {
    /// Store-assigned id.
    pub id: i64,
    /// Canonically smaller endpoint.
    pub user1_str_id: UserId,
    /// Display name of `user1_str_id`.
    pub user1_name: String,
    /// Canonically larger endpoint.
    pub user2_str_id: UserId,
    /// Display name of `user2_str_id`.
    pub user2_name: String,
    /// Creation time, unix seconds.
    pub created_at: i64,
}

/// Creates, removes and lists friendship edges.
#[derive(Clone)]
pub struct ConnectionService {
    store: Arc<dyn EdgeStore>,
}

impl ConnectionService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self { store }
    }

    /// Connects `a` and `b`.
    ///
    /// The self-loop check runs before any store access. Endpoints are
    /// checked in argument order, so a missing `a` is reported before a
    /// missing `b`.
    ///
    /// # Errors
    ///
    /// `SelfConnection`, `VertexNotFound`, or `EdgeAlreadyExists` (including
    /// when a concurrent insert of the same pair wins the race).
    pub async fn connect(&self, a: &UserId, b: &UserId) -> Result<Connection> {
        let pair = CanonicalPair::new(a, b)?;
        self.require_vertices(a, b).await?;

        if self.store.find_edge(&pair).await?.is_some() {
            return Err(already_exists(&pair));
        }

        let connection = self.store.insert_edge(&pair).await?;
        info!(
            user1 = %connection.user1_str_id,
            user2 = %connection.user2_str_id,
            id = connection.id,
            "Connection added"
        );
        Ok(connection)
    }

    /// Removes the edge between `a` and `b`, returning the removed record.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either user is absent, `EdgeNotFound` if no edge
    /// is stored. `disconnect(a, a)` is `EdgeNotFound`.
    pub async fn disconnect(&self, a: &UserId, b: &UserId) -> Result<Connection> {
        self.require_vertices(a, b).await?;

        let Ok(pair) = CanonicalPair::new(a, b) else {
            return Err(Error::EdgeNotFound(a.to_string(), b.to_string()));
        };

        match self.store.delete_edge(&pair).await? {
            Some(connection) => {
                info!(
                    user1 = %connection.user1_str_id,
                    user2 = %connection.user2_str_id,
                    "Connection removed"
                );
                Ok(connection)
            }
            None => {
                let (first, second) = pair.into_inner();
                Err(Error::EdgeNotFound(first.into_string(), second.into_string()))
            }
        }
    }

    /// Returns the stored edge between `a` and `b`, if any. A self pair has
    /// no edge.
    pub async fn find(&self, a: &UserId, b: &UserId) -> Result<Option<Connection>> {
        match CanonicalPair::new(a, b) {
            Ok(pair) => self.store.find_edge(&pair).await,
            Err(_) => Ok(None),
        }
    }

    /// Lists every connection with display names, newest first.
    pub async fn list(&self) -> Result<Vec<ConnectionRecord>> {
        let connections = self.store.list_connections().await?;
        if connections.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<UserId> = connections
            .iter()
            .flat_map(|c| {
                let (a, b) = c.endpoints();
                [a.clone(), b.clone()]
            })
            .collect();
        ids.sort();
        ids.dedup();

        let names: HashMap<UserId, String> = self
            .store
            .users_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.user_str_id, u.display_name))
            .collect();
        debug!(connections = connections.len(), users = names.len(), "Listing connections");

        let name_of = |id: &UserId| names.get(id).cloned().unwrap_or_default();
        Ok(connections
            .into_iter()
            .map(|c| ConnectionRecord {
                id: c.id,
                user1_name: name_of(&c.user1_str_id),
                user2_name: name_of(&c.user2_str_id),
                user1_str_id: c.user1_str_id,
                user2_str_id: c.user2_str_id,
                created_at: c.created_at,
            })
            .collect())
    }

    async fn require_vertices(&self, a: &UserId, b: &UserId) -> Result<()> {
        for id in [a, b] {
            if !self.store.vertex_exists(id).await? {
                return Err(Error::VertexNotFound(id.to_string()));
            }
        }
        Ok(())
    }
}

fn already_exists(pair: &CanonicalPair) -> Error {
    Error::EdgeAlreadyExists(pair.first().to_string(), pair.second().to_string())
}
