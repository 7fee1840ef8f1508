//! Todo repository.

pub mod queries;

use thiserror::Error;

/// Todo repository errors.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
