//! # Social Graph Core
//!
//! Users, symmetric friendship edges, and graph queries over them.
//!
//! The crate has three layers:
//!
//! - **Store**: the [`EdgeStore`] trait is the only source of truth. It is
//!   implemented by [`SqliteEdgeStore`] (relational, durable) and
//!   [`InMemoryEdgeStore`] (tests, ephemeral deployments).
//! - **Graph**: [`GraphSnapshot`] is rebuilt from the full edge list on every
//!   query; [`graph::traversal`] runs breadth-first search over it.
//! - **Services**: [`UserService`], [`ConnectionService`] and [`QueryService`]
//!   validate input against the store and shape results for the API layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use social_graph_core::{
//!     ConnectionService, InMemoryEdgeStore, NewUser, QueryService, UserId, UserService,
//! };
//!
//! # tokio_test_block(async {
//! let store = Arc::new(InMemoryEdgeStore::new());
//! let users = UserService::new(store.clone());
//! for id in ["alice", "bob", "carol"] {
//!     users.register(NewUser::new(id, id)).await?;
//! }
//!
//! let connections = ConnectionService::new(store.clone());
//! connections.connect(&UserId::from("alice"), &UserId::from("bob")).await?;
//! connections.connect(&UserId::from("bob"), &UserId::from("carol")).await?;
//!
//! let queries = QueryService::new(store);
//! let result = queries
//!     .degree(&UserId::from("alice"), &UserId::from("carol"))
//!     .await?;
//! assert_eq!(result.degree, 2);
//! # Ok::<(), social_graph_core::Error>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future<Output = Result<(), social_graph_core::Error>>>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f).unwrap();
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::uninlined_format_args, clippy::manual_assert))]

pub mod config;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod graph;
pub mod service;
pub mod store;

pub use config::{CorsConfig, RateLimitConfig, ServerConfig, SocialGraphConfig, StoreBackend, StoreConfig};
pub use error::{Error, Result};
pub use graph::traversal::Separation;
pub use graph::{canonical_order, CanonicalPair, Connection, GraphSnapshot, NewUser, User, UserId};
pub use service::{
    ConnectionRecord, ConnectionService, DegreeResult, FriendRecord, QueryService, UserService,
};
pub use store::{EdgeStore, InMemoryEdgeStore, SqliteEdgeStore};

/// Opens the store selected by `config`.
///
/// The SQLite backend creates its tables on first use.
///
/// # Errors
///
/// Returns `Error::StoreUnavailable` if the database cannot be opened.
pub async fn open_store(config: &StoreConfig) -> Result<std::sync::Arc<dyn EdgeStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory edge store; data will not survive restarts");
            Ok(std::sync::Arc::new(InMemoryEdgeStore::new()))
        }
        StoreBackend::Sqlite => {
            let store = SqliteEdgeStore::connect(&config.url, config.max_connections).await?;
            Ok(std::sync::Arc::new(store))
        }
    }
}
