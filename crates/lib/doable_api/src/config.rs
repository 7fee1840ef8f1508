//! API server configuration.

use doable_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                          |
    /// |----------------|----------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:3000`                 |
    /// | `DATABASE_URL` | `sqlite:doable.db?mode=rwc`      |
    /// | `JWT_SECRET`   | generated & persisted to file    |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:doable.db?mode=rwc".into()),
            jwt_secret: resolve_jwt_secret(),
        }
    }
}
