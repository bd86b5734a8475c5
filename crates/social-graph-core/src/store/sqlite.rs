//! Relational edge store backed by SQLite through `sqlx`.
//!
//! The schema carries the edge invariants as constraints: a UNIQUE pair, a
//! CHECK that the pair is in canonical order, and foreign keys to `users`.
//! Constraint violations are translated into typed core errors; anything else
//! surfaces as `Error::StoreUnavailable`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::{debug, info};

use super::{unix_now, EdgeStore};
use crate::error::{Error, Result};
use crate::graph::{CanonicalPair, Connection, NewUser, User, UserId};

/// Ids bound per `IN (...)` lookup. SQLite caps the number of bound
/// parameters per statement (32766 by default, 999 on older builds).
const USERS_BY_IDS_BATCH: usize = 500;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        user_str_id  TEXT PRIMARY KEY NOT NULL,
        display_name TEXT NOT NULL,
        email        TEXT,
        created_at   INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS connections (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        user1_str_id TEXT NOT NULL REFERENCES users(user_str_id),
        user2_str_id TEXT NOT NULL REFERENCES users(user_str_id),
        created_at   INTEGER NOT NULL,
        UNIQUE (user1_str_id, user2_str_id),
        CHECK (user1_str_id < user2_str_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_connections_user2 ON connections (user2_str_id)",
];

#[derive(Debug, FromRow)]
struct UserRow {
    user_str_id: String,
    display_name: String,
    email: Option<String>,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_str_id: UserId::from(row.user_str_id),
            display_name: row.display_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ConnectionRow {
    id: i64,
    user1_str_id: String,
    user2_str_id: String,
    created_at: i64,
}

impl From<ConnectionRow> for Connection {
    fn from(row: ConnectionRow) -> Self {
        Self {
            id: row.id,
            user1_str_id: UserId::from(row.user1_str_id),
            user2_str_id: UserId::from(row.user2_str_id),
            created_at: row.created_at,
        }
    }
}

/// [`EdgeStore`] backed by a pooled SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteEdgeStore {
    pub(super) pool: SqlitePool,
}

impl SqliteEdgeStore {
    /// Opens (creating if missing) the database at `url` and applies the
    /// schema.
    ///
    /// `sqlite::memory:` is supported; the pool is then pinned to a single
    /// connection that never expires, so every query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the database cannot be opened or
    /// the schema cannot be applied.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .acquire_timeout(Duration::from_secs(2))
                .idle_timeout(Duration::from_secs(30))
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        info!(url, in_memory, "Opened SQLite edge store");
        Ok(store)
    }

    /// Wraps an existing pool. The schema is applied before returning.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreUnavailable` if the schema cannot be applied.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("SQLite schema is up to date");
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Translates an insert failure into a typed error when it is a constraint
/// violation we can name.
fn map_insert_error(err: sqlx::Error, on_unique: Error, on_foreign_key: Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return on_unique;
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key;
        }
    }
    Error::from(err)
}

#[async_trait]
impl EdgeStore for SqliteEdgeStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let created_at = unix_now();
        sqlx::query(
            "INSERT INTO users (user_str_id, display_name, email, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user.user_str_id.as_str())
        .bind(&user.display_name)
        .bind(user.email.as_deref())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                Error::UserAlreadyExists(user.user_str_id.to_string()),
                Error::StoreUnavailable("unexpected foreign key on users".to_string()),
            )
        })?;

        Ok(User {
            user_str_id: user.user_str_id,
            display_name: user.display_name,
            email: user.email,
            created_at,
        })
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT user_str_id, display_name, email, created_at
             FROM users WHERE user_str_id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn vertex_exists(&self, id: &UserId) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM users WHERE user_str_id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut users = Vec::with_capacity(ids.len());
        for batch in ids.chunks(USERS_BY_IDS_BATCH) {
            let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
                "SELECT user_str_id, display_name, email, created_at FROM users WHERE user_str_id IN (",
            );
            let mut separated = builder.separated(", ");
            for id in batch {
                separated.push_bind(id.as_str());
            }
            separated.push_unseparated(")");

            let rows: Vec<UserRow> = builder.build_query_as().fetch_all(&self.pool).await?;
            users.extend(rows.into_iter().map(User::from));
        }
        Ok(users)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT user_str_id, display_name, email, created_at
             FROM users ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_all_edges(&self) -> Result<Vec<(UserId, UserId)>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT user1_str_id, user2_str_id FROM connections")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(a, b)| (UserId::from(a), UserId::from(b)))
            .collect())
    }

    async fn find_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>> {
        let row: Option<ConnectionRow> = sqlx::query_as(
            "SELECT id, user1_str_id, user2_str_id, created_at
             FROM connections WHERE user1_str_id = ? AND user2_str_id = ?",
        )
        .bind(pair.first().as_str())
        .bind(pair.second().as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Connection::from))
    }

    async fn insert_edge(&self, pair: &CanonicalPair) -> Result<Connection> {
        let row: ConnectionRow = sqlx::query_as(
            "INSERT INTO connections (user1_str_id, user2_str_id, created_at)
             VALUES (?, ?, ?)
             RETURNING id, user1_str_id, user2_str_id, created_at",
        )
        .bind(pair.first().as_str())
        .bind(pair.second().as_str())
        .bind(unix_now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                Error::EdgeAlreadyExists(pair.first().to_string(), pair.second().to_string()),
                Error::VertexNotFound(pair.to_string()),
            )
        })?;
        Ok(row.into())
    }

    async fn delete_edge(&self, pair: &CanonicalPair) -> Result<Option<Connection>> {
        let row: Option<ConnectionRow> = sqlx::query_as(
            "DELETE FROM connections
             WHERE user1_str_id = ? AND user2_str_id = ?
             RETURNING id, user1_str_id, user2_str_id, created_at",
        )
        .bind(pair.first().as_str())
        .bind(pair.second().as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Connection::from))
    }

    async fn list_connections(&self) -> Result<Vec<Connection>> {
        let rows: Vec<ConnectionRow> = sqlx::query_as(
            "SELECT id, user1_str_id, user2_str_id, created_at
             FROM connections ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Connection::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
