//! Per-query adjacency snapshot.
//!
//! A [`GraphSnapshot`] is built from the complete edge list each time a query
//! runs and dropped when the query returns. Nothing is cached between
//! requests, so there is no shared traversal state to synchronize.

use std::collections::HashMap;

use super::types::UserId;

/// Undirected, unweighted adjacency mapping built from an edge list.
///
/// Every vertex that appears in at least one edge has an entry. Vertices with
/// no edges are absent and report an empty neighbor list.
#[derive(Debug, Default, Clone)]
pub struct GraphSnapshot {
    /// Vertex -> directly connected vertices.
    adjacency: HashMap<UserId, Vec<UserId>>,
    /// Number of edges inserted (each undirected edge counts once).
    edge_count: usize,
}

impl GraphSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty snapshot with room for `expected_vertices` entries.
    #[must_use]
    pub fn with_capacity(expected_vertices: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(expected_vertices),
            edge_count: 0,
        }
    }

    /// Builds a snapshot from the full edge list.
    ///
    /// Each `(a, b)` is inserted in both directions. The input is not
    /// filtered; a malformed self-loop `(a, a)` is accepted and simply makes
    /// `a` its own neighbor, which traversal ignores because `a` is visited
    /// first.
    #[must_use]
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (UserId, UserId)>,
    {
        let edges = edges.into_iter();
        let mut snapshot = Self::with_capacity(edges.size_hint().0);
        for (a, b) in edges {
            snapshot.add_edge(a, b);
        }
        tracing::debug!(
            vertices = snapshot.vertex_count(),
            edges = snapshot.edge_count(),
            "Built graph snapshot"
        );
        snapshot
    }

    /// Inserts an undirected edge (two directed insertions).
    pub fn add_edge(&mut self, a: UserId, b: UserId) {
        self.adjacency.entry(a.clone()).or_default().push(b.clone());
        self.adjacency.entry(b).or_default().push(a);
        self.edge_count += 1;
    }

    /// Returns the neighbors of `vertex`, or an empty slice for a vertex that
    /// appears in no edge.
    #[must_use]
    pub fn neighbors(&self, vertex: &UserId) -> &[UserId] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if `vertex` appears in at least one edge.
    #[must_use]
    pub fn contains(&self, vertex: &UserId) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the number of vertices with at least one edge.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the number of neighbors of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: &UserId) -> usize {
        self.neighbors(vertex).len()
    }

    /// Iterates over every vertex with at least one edge.
    pub fn vertices(&self) -> impl Iterator<Item = &UserId> {
        self.adjacency.keys()
    }
}
