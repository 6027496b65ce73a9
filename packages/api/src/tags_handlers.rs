// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Lists and creates tags and lists the todos carrying a tag

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;

use todo_tags::TagCreateInput;

use crate::db::DbState;
use crate::extract::ApiJson;
use crate::response::{ok, respond, Affected};

/// List all tag labels
pub async fn list_tags(State(db): State<DbState>) -> Response {
    info!("Listing tags");

    ok(db.tag_storage.list_tags().await)
}

/// Create a tag; an existing label is not an error
pub async fn create_tag(
    State(db): State<DbState>,
    ApiJson(input): ApiJson<TagCreateInput>,
) -> Response {
    info!("Creating tag: {}", input.label);

    let result = db.tag_storage.create_tag(&input.label).await;
    let status = match result {
        Ok(0) => StatusCode::OK,
        _ => StatusCode::CREATED,
    };

    respond(status, result.map(|affected| Affected { affected }))
}

/// List the todos linked to a tag
pub async fn list_todos_by_tag(State(db): State<DbState>, Path(label): Path<String>) -> Response {
    info!("Listing todos by tag: {}", label);

    ok(db.todo_storage.list_todos_by_tag(&label).await)
}
