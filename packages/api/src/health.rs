// ABOUTME: Liveness endpoint
// ABOUTME: Reports service name, version and whether the database answers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

use crate::db::DbState;

pub async fn health_check(State(db): State<DbState>) -> impl IntoResponse {
    let (status, health, database) = match db.db.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    (
        status,
        Json(json!({
            "status": health,
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
            "service": "todo-server"
        })),
    )
}
