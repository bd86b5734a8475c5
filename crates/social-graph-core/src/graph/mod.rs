//! In-memory graph module.
//!
//! Provides the vertex and edge types, the per-query [`GraphSnapshot`], and
//! the breadth-first traversal algorithms that run over it.
//!
//! # Example
//!
//! ```rust
//! use social_graph_core::graph::{GraphSnapshot, UserId};
//! use social_graph_core::graph::traversal::{degree_of_separation, Separation};
//!
//! let snapshot = GraphSnapshot::build(vec![
//!     (UserId::from("alice"), UserId::from("bob")),
//!     (UserId::from("bob"), UserId::from("carol")),
//! ]);
//!
//! let alice = UserId::from("alice");
//! let carol = UserId::from("carol");
//! assert_eq!(degree_of_separation(&snapshot, &alice, &carol), Separation::Degree(2));
//! ```

mod snapshot;
pub mod traversal;
mod types;

#[cfg(test)]
mod traversal_tests;
#[cfg(test)]
mod types_tests;

pub use snapshot::GraphSnapshot;
pub use traversal::{GraphTraversal, Separation};
pub use types::{canonical_order, CanonicalPair, Connection, NewUser, User, UserId};
