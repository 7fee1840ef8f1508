//! Todo database queries.
//!
//! Every query is scoped to the owning user; a todo id from another user's
//! list behaves exactly like an id that never existed.

use sqlx::SqlitePool;

use super::TodoError;
use crate::models::todo::{Todo, TodoPatch};
use crate::uuid::uuidv7;

/// Create a todo for `owner_id`. Fails with a validation error when the text
/// is empty or whitespace.
pub async fn create_todo(
    pool: &SqlitePool,
    owner_id: &str,
    text: &str,
) -> Result<Todo, TodoError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TodoError::Validation("Todo text must not be empty".into()));
    }

    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (id, owner_id, text) VALUES (?1, ?2, ?3) \
         RETURNING id, text, completed, completed_at, owner_id",
    )
    .bind(uuidv7().to_string())
    .bind(owner_id)
    .bind(text)
    .fetch_one(pool)
    .await?;

    Ok(todo)
}

/// List all todos belonging to `owner_id`, in creation order (UUIDv7 ids).
pub async fn list_todos(pool: &SqlitePool, owner_id: &str) -> Result<Vec<Todo>, TodoError> {
    let todos = sqlx::query_as::<_, Todo>(
        "SELECT id, text, completed, completed_at, owner_id \
         FROM todos WHERE owner_id = ?1 ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(todos)
}

/// Fetch a single todo by id, scoped to its owner.
pub async fn get_todo(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
) -> Result<Option<Todo>, TodoError> {
    let todo = sqlx::query_as::<_, Todo>(
        "SELECT id, text, completed, completed_at, owner_id \
         FROM todos WHERE id = ?1 AND owner_id = ?2",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(todo)
}

/// Delete a todo by id, returning the removed row.
pub async fn delete_todo(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
) -> Result<Option<Todo>, TodoError> {
    let todo = sqlx::query_as::<_, Todo>(
        "DELETE FROM todos WHERE id = ?1 AND owner_id = ?2 \
         RETURNING id, text, completed, completed_at, owner_id",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(todo)
}

/// Apply a partial update. Text, when present, replaces the stored text;
/// the completion pair is always rewritten from the patch's merge policy.
pub async fn update_todo(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
    patch: &TodoPatch,
) -> Result<Option<Todo>, TodoError> {
    if let Some(text) = &patch.text
        && text.trim().is_empty()
    {
        return Err(TodoError::Validation("Todo text must not be empty".into()));
    }

    let (completed, completed_at) = patch.completion();

    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos \
         SET text = COALESCE(?3, text), completed = ?4, completed_at = ?5 \
         WHERE id = ?1 AND owner_id = ?2 \
         RETURNING id, text, completed, completed_at, owner_id",
    )
    .bind(id)
    .bind(owner_id)
    .bind(patch.text.as_deref().map(str::trim))
    .bind(completed)
    .bind(completed_at)
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}
