// ABOUTME: HTTP API layer for the todo service providing REST endpoints and routing
// ABOUTME: Integration layer that depends on the todo and tag repositories

use axum::{
    routing::{delete, get, post},
    Router,
};

pub mod db;
pub mod error;
pub mod extract;
pub mod filter_params;
pub mod health;
pub mod response;
pub mod tags_handlers;
pub mod todos_handlers;

pub use db::DbState;
pub use error::AppError;
pub use extract::ApiJson;
pub use response::ApiResponse;

/// Creates the todos API router (nested under /todos)
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route(
            "/{id}",
            get(todos_handlers::get_todo)
                .put(todos_handlers::update_todo)
                .patch(todos_handlers::patch_todo)
                .delete(todos_handlers::delete_todo),
        )
        .route("/{id}/tags", post(todos_handlers::add_todo_tag))
        .route("/{id}/tags/{label}", delete(todos_handlers::remove_todo_tag))
}

/// Creates the tags API router (nested under /tags)
pub fn create_tags_router() -> Router<DbState> {
    Router::new()
        .route(
            "/",
            get(tags_handlers::list_tags).post(tags_handlers::create_tag),
        )
        .route("/{label}", get(tags_handlers::list_todos_by_tag))
}

/// Full application router with state attached
pub fn create_router(state: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/todos", create_todos_router())
        .nest("/tags", create_tags_router())
        .with_state(state)
}
