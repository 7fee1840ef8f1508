//! Authentication service — register/login/logout flows delegating to
//! `doable_core::auth`.

use sqlx::SqlitePool;
use tracing::info;

use doable_core::auth::{password, queries, tokens};
use doable_core::models::auth::{ACCESS_AUTH, User};

use crate::error::{AppError, AppResult};

/// Minimum password length, matching the original data model.
const MIN_PASSWORD_LEN: usize = 4;

/// Cheap structural email check: something@domain, with a dot somewhere in
/// the domain and no whitespace.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Register a new user account and issue its first auth token.
///
/// Ordering matters and is always sequential: the password is hashed before
/// anything persists, the user row persists before a token is signed, and
/// the token row persists before the token is returned.
pub async fn register(
    pool: &SqlitePool,
    email: &str,
    plaintext: &str,
    jwt_secret: &[u8],
) -> AppResult<(User, String)> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AppError::Validation(format!("{email} is not a valid email")));
    }
    if plaintext.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if queries::email_exists(pool, email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let pw_hash = password::hash_password(plaintext)?;
    let user_id = queries::create_user(pool, email, &pw_hash).await?;
    let token = tokens::issue(pool, &user_id, ACCESS_AUTH, jwt_secret).await?;

    info!(user_id, "registered new user");

    Ok((
        User {
            id: user_id,
            email: email.to_string(),
        },
        token,
    ))
}

/// Authenticate with email + password, issuing a fresh auth token.
///
/// Unknown email and wrong password fail identically; callers can never
/// probe which address is registered.
pub async fn login(
    pool: &SqlitePool,
    email: &str,
    plaintext: &str,
    jwt_secret: &[u8],
) -> AppResult<(User, String)> {
    let Some(record) = queries::find_user_by_email(pool, email.trim()).await? else {
        return Err(AppError::BadCredentials);
    };

    if !password::verify_password(plaintext, &record.password_hash)? {
        return Err(AppError::BadCredentials);
    }

    let token = tokens::issue(pool, &record.user.id, ACCESS_AUTH, jwt_secret).await?;

    Ok((record.user, token))
}

/// Logout — revoke the session's own token. Idempotent.
pub async fn logout(pool: &SqlitePool, user_id: &str, token: &str) -> AppResult<()> {
    tokens::revoke(pool, user_id, token).await?;
    Ok(())
}
