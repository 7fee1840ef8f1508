//! User credential store queries.

use sqlx::SqlitePool;

use super::AuthError;
use crate::models::auth::{User, UserWithPassword};
use crate::uuid::uuidv4;

/// Fetch a user by email, including the stored password hash.
pub async fn find_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, (String, String, String)>(
        "SELECT id, email, password_hash FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id, email, password_hash)| UserWithPassword {
        user: User { id, email },
        password_hash,
    }))
}

/// Create a new user, returning the user ID.
///
/// The caller passes an already-hashed password; plaintext never reaches
/// this layer. The schema's UNIQUE constraint on email is the backstop for
/// concurrent duplicate registrations.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<String, AuthError> {
    let user_id = uuidv4().to_string();
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?1, ?2, ?3)")
        .bind(&user_id)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(user_id)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Fetch a user by ID.
pub async fn get_user_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|email| User {
        id: user_id.to_string(),
        email,
    }))
}
