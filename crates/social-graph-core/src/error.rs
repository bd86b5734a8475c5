//! Error types for the social graph core.
//!
//! Every failure the core can raise is a variant of [`Error`]. Each variant
//! carries a stable machine-readable code (see [`Error::code`]) and a
//! human-readable message (its `Display`). An unreachable target is not an
//! error: it is reported as [`crate::Separation::NotConnected`].

use thiserror::Error;

/// Result type alias for social graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the store, the services, and configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A referenced user does not exist.
    #[error("User '{0}' not found")]
    VertexNotFound(String),

    /// Both endpoints of a connection are the same user.
    #[error("User '{0}' cannot connect to themselves")]
    SelfConnection(String),

    /// The canonical edge is already stored.
    #[error("Connection already exists between '{0}' and '{1}'")]
    EdgeAlreadyExists(String, String),

    /// The canonical edge is not stored.
    #[error("Connection not found between '{0}' and '{1}'")]
    EdgeNotFound(String, String),

    /// A user with this id is already registered.
    #[error("User with id '{0}' already exists")]
    UserAlreadyExists(String),

    /// The backing store could not be reached or failed unexpectedly.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the stable, machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::VertexNotFound(_) => "USER_NOT_FOUND",
            Self::SelfConnection(_) => "INVALID_CONNECTION",
            Self::EdgeAlreadyExists(..) => "CONNECTION_EXISTS",
            Self::EdgeNotFound(..) => "CONNECTION_NOT_FOUND",
            Self::UserAlreadyExists(_) => "USER_EXISTS",
            Self::StoreUnavailable(_) => "DATABASE_UNAVAILABLE",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Returns true if the error was caused by the caller's input rather
    /// than by the store or the deployment.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_) | Self::Config(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
