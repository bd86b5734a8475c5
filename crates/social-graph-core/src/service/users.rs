//! User registration and lookup.

use std::sync::Arc;

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{NewUser, User, UserId};
use crate::store::EdgeStore;

/// Registers and looks up users.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn EdgeStore>,
}

impl UserService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self { store }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// `Error::UserAlreadyExists` if the id is taken.
    pub async fn register(&self, user: NewUser) -> Result<User> {
        let user = self.store.insert_user(user).await?;
        info!(user_str_id = %user.user_str_id, "User registered");
        Ok(user)
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// `Error::VertexNotFound` if no such user exists.
    pub async fn get(&self, id: &UserId) -> Result<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))
    }

    /// Lists every user, newest first.
    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }
}
