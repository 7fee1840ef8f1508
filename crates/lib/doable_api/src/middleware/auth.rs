//! Authentication middleware — `x-auth` token extraction and verification.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use doable_core::auth::jwt::verify_auth_token;
use doable_core::auth::{queries, tokens};
use doable_core::models::auth::{ACCESS_AUTH, User};

use crate::AppState;
use crate::error::AppError;

/// Header carrying the auth token, on requests and on issuing responses.
pub const AUTH_HEADER: &str = "x-auth";

/// The resolved caller, stored in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// The raw token the request authenticated with, so a logout handler can
    /// revoke exactly this session.
    pub token: String,
}

/// Axum middleware: extracts the `x-auth` header, verifies the JWT, confirms
/// the token is still in the user's issued list, and injects
/// [`AuthenticatedUser`] into request extensions.
///
/// The second check is deliberate: a revoked token keeps verifying
/// cryptographically until it expires, but it must stop working the moment
/// its row is gone.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing x-auth header".into()))?
        .to_string();

    let claims = verify_auth_token(&token, state.config.jwt_secret.as_bytes())
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    let live = tokens::token_is_live(&state.pool, &claims.sub, &token, ACCESS_AUTH).await?;
    if !live {
        return Err(AppError::Unauthorized("Invalid or expired token".into()));
    }

    let user = queries::get_user_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".into()))?;

    request.extensions_mut().insert(AuthenticatedUser { user, token });

    Ok(next.run(request).await)
}
