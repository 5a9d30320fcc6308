//! Database Module
//!
//! Opens the SQLite pool shared by the graph and content stores and creates
//! the schema if it does not exist yet.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::error::StoreError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS follows (
        follower_id TEXT NOT NULL,
        followed_id TEXT NOT NULL,
        PRIMARY KEY (follower_id, followed_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_follows_followed ON follows (followed_id)",
    "CREATE TABLE IF NOT EXISTS content_items (
        id TEXT PRIMARY KEY NOT NULL,
        author_id TEXT NOT NULL,
        body TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_content_author_created
        ON content_items (author_id, created_at DESC)",
];

/// Connects to `config.database_url` and applies the schema.
///
/// An in-memory database exists per connection, so the pool is pinned to a
/// single connection that is never closed.
pub async fn connect(config: &Config) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let pool = if config.is_in_memory_db() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.max(1))
            .connect_with(options)
            .await?
    };

    migrate(&pool).await?;
    info!(url = %config.database_url, "Database connected and schema applied");
    Ok(pool)
}

/// Creates missing tables and indexes. Safe to run repeatedly.
pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// In-memory pool with the schema applied.
pub async fn connect_in_memory() -> Result<SqlitePool, StoreError> {
    connect(&Config::default()).await
}
