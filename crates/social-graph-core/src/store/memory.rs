//! In-memory edge store (no persistence).
//!
//! Users and canonical edges live in maps behind a single `RwLock`. Every
//! mutation does its existence check and its write under one write guard, so
//! the check-then-insert sequence is atomic.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{unix_now, EdgeStore};
use crate::error::{Error, Result};
use crate::graph::{CanonicalPair, Connection, NewUser, User, UserId};

#[derive(Debug, Default)]
struct Tables {
    /// All users indexed by id.
    users: HashMap<UserId, User>,
    /// Registration order, for newest-first listing.
    user_order: Vec<UserId>,
    /// Canonical pair -> stored edge.
    edges: BTreeMap<CanonicalPair, Connection>,
    /// Last assigned edge id.
    next_edge_id: i64,
}

/// Process-local [`EdgeStore`] for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct InMemoryEdgeStore {
    tables: RwLock<Tables>,
}

impl InMemoryEdgeStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.tables.read().users.len()
    }

    /// Returns the number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.tables.read().edges.len()
    }
}

#[async_trait]
impl EdgeStore for InMemoryEdgeStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write();
        if tables.users.contains_key(&user.user_str_id) {
            return Err(Error::UserAlreadyExists(user.user_str_id.into_string()));
        }
        let stored = User {
            user_str_id: user.user_str_id,
            display_name: user.display_name,
            email: user.email,
            created_at: unix_now(),
        };
        tables.user_order.push(stored.user_str_id.clone());
        tables
            .users
            .insert(stored.user_str_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.tables.read().users.get(id).cloned())
    }

    async fn vertex_exists(&self, id: &UserId) -> Result<bool> {
        Ok(self.tables.read().users.contains_key(id))
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read();
        Ok(tables
            .user_order
            .iter()
            .rev()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn list_all_edges(&self) -> Result<Vec<(UserId, UserId)>> {
        Ok(self
            .tables
            .read()
            .edges
            .keys()
            .map(|pair| (pair.first().clone(), pair.second().clone()))
            .collect())
    }

    async fn find_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>> {
        Ok(self.tables.read().edges.get(pair).cloned())
    }

    async fn insert_edge(&self, pair: &CanonicalPair) -> Result<Connection> {
        let mut tables = self.tables.write();
        for endpoint in [pair.first(), pair.second()] {
            if !tables.users.contains_key(endpoint) {
                return Err(Error::VertexNotFound(endpoint.to_string()));
            }
        }
        if tables.edges.contains_key(pair) {
            return Err(Error::EdgeAlreadyExists(
                pair.first().to_string(),
                pair.second().to_string(),
            ));
        }

        tables.next_edge_id += 1;
        let connection = Connection {
            id: tables.next_edge_id,
            user1_str_id: pair.first().clone(),
            user2_str_id: pair.second().clone(),
            created_at: unix_now(),
        };
        tables.edges.insert(pair.clone(), connection.clone());
        Ok(connection)
    }

    async fn delete_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>> {
        Ok(self.tables.write().edges.remove(pair))
    }

    async fn list_connections(&self) -> Result<Vec<Connection>> {
        let mut connections: Vec<Connection> =
            self.tables.read().edges.values().cloned().collect();
        // Ids are assigned monotonically, so descending id is newest first.
        connections.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(connections)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
