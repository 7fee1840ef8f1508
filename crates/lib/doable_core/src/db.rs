//! SQLite pool construction.
//!
//! One connection pool per process, passed explicitly into every query
//! function. Nothing in this crate holds a process-wide store handle.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Default pool size for on-disk databases.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool against `database_url` (e.g. `sqlite:doable.db?mode=rwc`),
/// creating the database file if it does not exist.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    info!(database_url, max_connections, "connecting to database");

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}

/// Open an in-memory pool, used by tests.
///
/// Capped at a single connection: each connection to `sqlite::memory:` gets
/// its own private database, so pooling more would split state.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
}
