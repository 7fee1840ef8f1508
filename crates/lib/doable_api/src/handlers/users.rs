//! User and session request handlers.

use axum::extract::State;
use axum::response::AppendHeaders;
use axum::{Extension, Json};
use serde::Deserialize;

use doable_core::models::auth::User;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{AUTH_HEADER, AuthenticatedUser};
use crate::services::auth;

/// Body for `POST /users` and `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

type UserWithToken = (AppendHeaders<[(&'static str, String); 1]>, Json<User>);

fn user_with_token(user: User, token: String) -> UserWithToken {
    (AppendHeaders([(AUTH_HEADER, token)]), Json(user))
}

/// `POST /users` — register a new account. The issued token rides back in
/// the `x-auth` response header; the body never carries it.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<UserWithToken> {
    let (user, token) = auth::register(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(user_with_token(user, token))
}

/// `POST /users/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<UserWithToken> {
    let (user, token) = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(user_with_token(user, token))
}

/// `GET /users/me` — the authenticated caller's own record.
pub async fn me_handler(
    Extension(auth): Extension<AuthenticatedUser>,
) -> AppResult<Json<User>> {
    Ok(Json(auth.user))
}

/// `DELETE /users/me/token` — revoke the token this request authenticated
/// with, ending the session.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AppResult<Json<serde_json::Value>> {
    auth::logout(&state.pool, &auth.user.id, &auth.token).await?;
    Ok(Json(serde_json::json!({})))
}
