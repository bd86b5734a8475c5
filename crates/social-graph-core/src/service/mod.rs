//! Services composing the store and the traversal engine.
//!
//! Each service holds a shared handle to the [`EdgeStore`](crate::EdgeStore)
//! and nothing else, so they are cheap to clone into request handlers.

mod connections;
mod queries;
mod users;

#[cfg(test)]
mod users_tests;

pub use connections::{ConnectionRecord, ConnectionService};
pub use queries::{DegreeResult, FriendRecord, QueryService};
pub use users::UserService;
