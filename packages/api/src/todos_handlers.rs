// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: Handles filtered listing, CRUD and tag links for todos

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use todo_items::{TodoCreateInput, TodoPatch, TodoUpdateInput};

use crate::db::DbState;
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::filter_params::TodoListQuery;
use crate::response::{created, ok, Affected};

/// List todos, optionally filtered by completion, priority range and label text
pub async fn list_todos(
    State(db): State<DbState>,
    Query(params): Query<TodoListQuery>,
) -> Response {
    let filter = match params.into_filter() {
        Ok(filter) => filter,
        Err(e) => return AppError::from(e).into_response(),
    };

    info!("Listing todos (filtered: {})", !filter.is_empty());

    ok(db.todo_storage.list_todos(&filter).await)
}

/// Get a single todo by ID
pub async fn get_todo(State(db): State<DbState>, Path(id): Path<i64>) -> Response {
    info!("Getting todo: {}", id);

    ok(db.todo_storage.get_todo(id).await)
}

/// Create a new todo
pub async fn create_todo(
    State(db): State<DbState>,
    ApiJson(input): ApiJson<TodoCreateInput>,
) -> Response {
    info!("Creating todo: {}", input.label);

    created(db.todo_storage.create_todo(input).await)
}

/// Replace label, priority and completion of a todo
pub async fn update_todo(
    State(db): State<DbState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<TodoUpdateInput>,
) -> Response {
    info!("Updating todo: {}", id);

    ok(db.todo_storage.update_todo(id, input).await)
}

/// Apply a partial update; reports the number of rows changed
pub async fn patch_todo(
    State(db): State<DbState>,
    Path(id): Path<i64>,
    ApiJson(patch): ApiJson<TodoPatch>,
) -> Response {
    info!("Patching todo: {} ({:?})", id, patch);

    let result = db.todo_storage.patch_todo(id, patch).await;
    ok(result.map(|affected| Affected { affected }))
}

/// Delete a todo; deleting a missing todo reports zero rows
pub async fn delete_todo(State(db): State<DbState>, Path(id): Path<i64>) -> Response {
    info!("Deleting todo: {}", id);

    let result = db.todo_storage.delete_todo(id).await;
    ok(result.map(|affected| Affected { affected }))
}

/// Request body for linking a tag
#[derive(Deserialize)]
pub struct AddTagRequest {
    pub label: String,
}

/// Link an existing tag to a todo
pub async fn add_todo_tag(
    State(db): State<DbState>,
    Path(id): Path<i64>,
    ApiJson(request): ApiJson<AddTagRequest>,
) -> Response {
    info!("Adding tag '{}' to todo {}", request.label, id);

    let result = db.tag_storage.add_item_tag(id, &request.label).await;
    ok(result.map(|affected| Affected { affected }))
}

/// Unlink a tag from a todo
pub async fn remove_todo_tag(
    State(db): State<DbState>,
    Path((id, label)): Path<(i64, String)>,
) -> Response {
    info!("Removing tag '{}' from todo {}", label, id);

    let result = db.tag_storage.remove_item_tag(id, &label).await;
    ok(result.map(|affected| Affected { affected }))
}
