//! Todo request handlers.
//!
//! Every route runs behind the auth middleware and operates only on the
//! caller's own todos.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use doable_core::models::todo::{Todo, TodoPatch};
use doable_core::todos::queries;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;

/// Body for `POST /todos`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Serialize)]
pub struct RemovedTodoResponse {
    pub remove: Todo,
}

/// Validate a path id. Ids are UUIDs; anything that does not parse can never
/// match a row, so the caller gets the same error as for an absent record
/// (or a 400 on PATCH) instead of a 500 from deeper down.
fn check_id(id: &str, err: fn(String) -> AppError) -> Result<(), AppError> {
    if Uuid::try_parse(id).is_err() {
        return Err(err(format!("{id} is not a valid todo id")));
    }
    Ok(())
}

/// `POST /todos` — create a todo owned by the caller.
pub async fn create_todo_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<CreateTodoRequest>,
) -> AppResult<Json<Todo>> {
    let todo = queries::create_todo(&state.pool, &auth.user.id, &body.text).await?;
    Ok(Json(todo))
}

/// `GET /todos` — list the caller's todos.
pub async fn list_todos_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AppResult<Json<TodoListResponse>> {
    let todos = queries::list_todos(&state.pool, &auth.user.id).await?;
    Ok(Json(TodoListResponse { todos }))
}

/// `GET /todos/{id}` — fetch one todo. Malformed and unknown ids both 404.
pub async fn get_todo_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<TodoResponse>> {
    check_id(&id, AppError::NotFound)?;
    let todo = queries::get_todo(&state.pool, &auth.user.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    Ok(Json(TodoResponse { todo }))
}

/// `DELETE /todos/{id}` — remove one todo, echoing the removed record.
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<RemovedTodoResponse>> {
    check_id(&id, AppError::NotFound)?;
    let removed = queries::delete_todo(&state.pool, &auth.user.id, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    Ok(Json(RemovedTodoResponse { remove: removed }))
}

/// `PATCH /todos/{id}` — partial update through the merge policy. A
/// malformed id is a 400 here, unlike GET/DELETE.
pub async fn patch_todo_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> AppResult<Json<TodoResponse>> {
    check_id(&id, AppError::Validation)?;
    let todo = queries::update_todo(&state.pool, &auth.user.id, &id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;
    Ok(Json(TodoResponse { todo }))
}
