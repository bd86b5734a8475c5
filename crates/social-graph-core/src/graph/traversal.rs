//! Breadth-first traversal over an undirected graph.
//!
//! Provides generic traversal via the [`GraphTraversal`] trait, so the same
//! algorithms run over a [`GraphSnapshot`] or any other adjacency source.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::snapshot::GraphSnapshot;
use super::types::UserId;

/// Trait for graph traversal. Any undirected adjacency source can implement
/// this.
pub trait GraphTraversal {
    /// Returns the direct neighbors of `vertex`; empty for an isolated or
    /// unknown vertex.
    fn neighbors(&self, vertex: &UserId) -> &[UserId];
}

impl GraphTraversal for GraphSnapshot {
    fn neighbors(&self, vertex: &UserId) -> &[UserId] {
        GraphSnapshot::neighbors(self, vertex)
    }
}

/// Outcome of a shortest-path length query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separation {
    /// Target reached after this many hops (0 when source == target).
    Degree(u32),
    /// No path exists between the two vertices.
    NotConnected,
}

impl Separation {
    /// Message attached to unreachable results.
    pub const NOT_CONNECTED_MESSAGE: &'static str = "not_connected";

    /// Returns the hop count, or `-1` when not connected.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Degree(d) => i64::from(d),
            Self::NotConnected => -1,
        }
    }

    /// Returns true if a path exists.
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Degree(_))
    }
}

/// Shortest-path length between `source` and `target` using BFS.
///
/// `source == target` returns `Degree(0)` without traversing. Otherwise the
/// first time `target` is dequeued its distance is returned; BFS dequeues in
/// non-decreasing distance order so that distance is minimal.
///
/// Neighbor order does not affect the result because only the length is
/// returned. Callers must check vertex existence first: an unknown vertex
/// here is indistinguishable from an isolated one.
#[must_use]
pub fn degree_of_separation<G: GraphTraversal>(
    graph: &G,
    source: &UserId,
    target: &UserId,
) -> Separation {
    if source == target {
        return Separation::Degree(0);
    }

    let mut visited: HashSet<&UserId> = HashSet::new();
    let mut queue: VecDeque<(&UserId, u32)> = VecDeque::new();

    visited.insert(source);
    queue.push_back((source, 0));

    while let Some((current, distance)) = queue.pop_front() {
        if current == target {
            return Separation::Degree(distance);
        }

        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back((neighbor, distance + 1));
            }
        }
    }

    Separation::NotConnected
}

/// Vertices at distance exactly 1 from `vertex`.
#[must_use]
pub fn direct_neighbors<'g, G: GraphTraversal>(
    graph: &'g G,
    vertex: &UserId,
) -> BTreeSet<&'g UserId> {
    graph
        .neighbors(vertex)
        .iter()
        .filter(|n| *n != vertex)
        .collect()
}

/// Vertices at distance exactly 2 from `vertex`.
///
/// Union of the neighbors of every direct neighbor, minus `vertex` itself and
/// minus the entire distance-1 set. A vertex reachable through two different
/// length-2 paths appears once; a vertex that is also a direct neighbor (a
/// triangle) does not appear at all.
#[must_use]
pub fn second_degree_neighbors<'g, G: GraphTraversal>(
    graph: &'g G,
    vertex: &UserId,
) -> BTreeSet<&'g UserId> {
    let direct = direct_neighbors(graph, vertex);

    direct
        .iter()
        .flat_map(|friend| graph.neighbors(friend))
        .filter(|candidate| *candidate != vertex && !direct.contains(candidate))
        .collect()
}
