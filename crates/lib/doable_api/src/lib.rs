//! # doable_api
//!
//! HTTP API library for Doable.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::Router;
use axum::routing::{delete, get, post};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{todos, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `doable_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    doable_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/users", post(users::register_handler))
        .route("/users/login", post(users::login_handler));

    // Protected routes (require a live token)
    let protected = Router::new()
        .route("/users/me", get(users::me_handler))
        .route("/users/me/token", delete(users::logout_handler))
        .route(
            "/todos",
            post(todos::create_todo_handler).get(todos::list_todos_handler),
        )
        .route(
            "/todos/{id}",
            get(todos::get_todo_handler)
                .delete(todos::delete_todo_handler)
                .patch(todos::patch_todo_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
