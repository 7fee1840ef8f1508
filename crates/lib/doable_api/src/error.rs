//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login failure. Always the same message whatever went wrong, and a 400
    /// rather than 401: only established-session checks answer 401.
    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::BadCredentials => {
                (StatusCode::BAD_REQUEST, "bad_credentials", "Invalid credentials")
            }
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            // Duplicate-email backstop: the schema's UNIQUE constraint fires
            // when two registrations race past the explicit existence check.
            sqlx::Error::Database(ref d) if d.is_unique_violation() => {
                AppError::Validation("Email already registered".into())
            }
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<doable_core::auth::AuthError> for AppError {
    fn from(e: doable_core::auth::AuthError) -> Self {
        match e {
            doable_core::auth::AuthError::CredentialError => AppError::BadCredentials,
            doable_core::auth::AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            doable_core::auth::AuthError::ValidationError(msg) => AppError::Validation(msg),
            doable_core::auth::AuthError::DbError(e) => AppError::from(e),
            doable_core::auth::AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<doable_core::todos::TodoError> for AppError {
    fn from(e: doable_core::todos::TodoError) -> Self {
        match e {
            doable_core::todos::TodoError::Validation(msg) => AppError::Validation(msg),
            doable_core::todos::TodoError::DbError(e) => AppError::from(e),
        }
    }
}
