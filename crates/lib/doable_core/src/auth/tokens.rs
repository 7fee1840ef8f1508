//! Issued-token store.
//!
//! Every signed auth token is also recorded verbatim in `user_tokens`, so a
//! session can be revoked by deleting the row while the JWT itself is still
//! inside its cryptographic validity window. The guard checks both.

use sqlx::SqlitePool;

use super::AuthError;
use super::jwt::sign_auth_token;
use crate::uuid::uuidv7;

/// Sign a token for `user_id` with the given access level, append it to the
/// user's token list, and return it.
///
/// The row insert persists before the token is handed out; a token the
/// client holds is always one the guard can find.
pub async fn issue(
    pool: &SqlitePool,
    user_id: &str,
    access: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    let token = sign_auth_token(user_id, access, secret)?;

    sqlx::query("INSERT INTO user_tokens (id, user_id, access, token) VALUES (?1, ?2, ?3, ?4)")
        .bind(uuidv7().to_string())
        .bind(user_id)
        .bind(access)
        .bind(&token)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Check whether a token string is still in the user's list with the given
/// access level. False once revoked, however valid the signature.
pub async fn token_is_live(
    pool: &SqlitePool,
    user_id: &str,
    token: &str,
    access: &str,
) -> Result<bool, AuthError> {
    let live = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(\
             SELECT 1 FROM user_tokens \
             WHERE user_id = ?1 AND token = ?2 AND access = ?3)",
    )
    .bind(user_id)
    .bind(token)
    .bind(access)
    .fetch_one(pool)
    .await?;
    Ok(live)
}

/// Remove a token from a user's list. Removing an absent token is not an
/// error; revocation is idempotent.
pub async fn revoke(pool: &SqlitePool, user_id: &str, token: &str) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM user_tokens WHERE user_id = ?1 AND token = ?2")
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
