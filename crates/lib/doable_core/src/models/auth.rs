//! Authentication domain models.
//!
//! `User` is the public shape — it is what handlers serialize, so the
//! password hash and issued-token list never appear on the wire.

use serde::{Deserialize, Serialize};

/// Access level tag embedded in tokens. Sessions are the only use today.
pub const ACCESS_AUTH: &str = "auth";

/// Domain user, safe to serialize in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// User with password hash (for internal auth flows only).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// JWT claims embedded in auth tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Access level (see [`ACCESS_AUTH`]).
    pub access: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

