//! Vertex and edge types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, externally assigned user identifier (`user_str_id`).
///
/// Ordering is lexicographic on the underlying string; it defines the
/// canonical order of an edge's endpoints.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered user (graph vertex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique external id.
    pub user_str_id: UserId,
    /// Name shown to people; used to order friend lists.
    pub display_name: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// Registration time, unix seconds.
    pub created_at: i64,
}

/// Registration payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique external id.
    pub user_str_id: UserId,
    /// Name shown to people.
    pub display_name: String,
    /// Optional contact address.
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    /// Creates a registration payload without an email.
    #[must_use]
    pub fn new(user_str_id: impl Into<UserId>, display_name: &str) -> Self {
        Self {
            user_str_id: user_str_id.into(),
            display_name: display_name.to_string(),
            email: None,
        }
    }

    /// Sets the email (builder pattern).
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}

/// Orders two endpoints so the lexicographically smaller one comes first.
///
/// `(a, b)` and `(b, a)` always produce the same tuple.
#[must_use]
pub fn canonical_order<'a>(a: &'a UserId, b: &'a UserId) -> (&'a UserId, &'a UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An undirected edge key in canonical order, guaranteed not to be a
/// self-loop.
///
/// The only constructor is [`CanonicalPair::new`], so every store path that
/// takes a `CanonicalPair` sees the same normalized representation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalPair {
    first: UserId,
    second: UserId,
}

impl CanonicalPair {
    /// Normalizes `(a, b)` into canonical order.
    ///
    /// # Errors
    ///
    /// Returns `Error::SelfConnection` if `a == b`.
    pub fn new(a: &UserId, b: &UserId) -> Result<Self> {
        if a == b {
            return Err(Error::SelfConnection(a.to_string()));
        }
        let (first, second) = canonical_order(a, b);
        Ok(Self {
            first: first.clone(),
            second: second.clone(),
        })
    }

    /// Returns the smaller endpoint.
    #[must_use]
    pub fn first(&self) -> &UserId {
        &self.first
    }

    /// Returns the larger endpoint.
    #[must_use]
    pub fn second(&self) -> &UserId {
        &self.second
    }

    /// Returns true if `id` is one of the endpoints.
    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        &self.first == id || &self.second == id
    }

    /// Consumes the pair, returning `(first, second)`.
    #[must_use]
    pub fn into_inner(self) -> (UserId, UserId) {
        (self.first, self.second)
    }
}

impl fmt::Display for CanonicalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// A stored connection (edge record) in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Store-assigned id.
    pub id: i64,
    /// Smaller endpoint.
    pub user1_str_id: UserId,
    /// Larger endpoint.
    pub user2_str_id: UserId,
    /// Creation time, unix seconds.
    pub created_at: i64,
}

impl Connection {
    /// Returns the canonical key of this connection.
    #[must_use]
    pub fn endpoints(&self) -> (&UserId, &UserId) {
        (&self.user1_str_id, &self.user2_str_id)
    }
}
