//! Service configuration.
//!
//! Sources are layered with `figment`, later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`SocialGraphConfig::default`])
//! 2. An optional TOML file (`social-graph.toml` unless a path is given)
//! 3. Environment variables prefixed with `SOCIAL_GRAPH_`, nested keys
//!    separated by `__` (e.g. `SOCIAL_GRAPH_SERVER__PORT=9000`)

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "social-graph.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "SOCIAL_GRAPH_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialGraphConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Edge store settings.
    pub store: StoreConfig,
    /// Request rate limiting for `/api` routes.
    pub rate_limit: RateLimitConfig,
    /// Allowed CORS origins.
    pub cors: CorsConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which [`crate::EdgeStore`] implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Relational store backed by SQLite.
    #[default]
    Sqlite,
    /// Process-local maps; nothing is persisted.
    Memory,
}

/// Edge store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend selection.
    pub backend: StoreBackend,
    /// Database URL (SQLite backend only).
    pub url: String,
    /// Maximum pooled connections (SQLite backend only).
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            url: "sqlite://social_connections.db".to_string(),
            max_connections: 20,
        }
    }
}

/// Fixed-window rate limit. `max_requests == 0` disables limiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u64,
    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

impl RateLimitConfig {
    /// Returns true if rate limiting is turned on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }
}

/// CORS settings. An empty origin list means permissive (development) mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins, e.g. `http://localhost:3001`.
    pub origins: Vec<String>,
}

impl SocialGraphConfig {
    /// Loads configuration from defaults, an optional TOML file, and the
    /// environment.
    ///
    /// When `path` is `None`, `social-graph.toml` in the working directory is
    /// used if present. An explicit path that does not exist is an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a source cannot be parsed or the merged
    /// configuration fails [`Self::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "config file '{}' does not exist",
                        p.display()
                    )));
                }
                figment = figment.merge(Toml::file(p));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Parses configuration from a TOML string layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the string is not valid or fails validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml_str)),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }
        if self.store.backend == StoreBackend::Sqlite {
            if self.store.url.trim().is_empty() {
                return Err(Error::Config(
                    "store.url is required for the sqlite backend".to_string(),
                ));
            }
            if self.store.max_connections == 0 {
                return Err(Error::Config(
                    "store.max_connections must be at least 1".to_string(),
                ));
            }
        }
        if self.rate_limit.is_enabled() && self.rate_limit.window_secs == 0 {
            return Err(Error::Config(
                "rate_limit.window_secs must be non-zero when limiting is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as TOML, e.g. for `--print-config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Returns the `host:port` listen address. IPv6 hosts are bracketed.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        let host = self.server.host.as_str();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.server.port)
        } else {
            format!("{host}:{}", self.server.port)
        }
    }
}
