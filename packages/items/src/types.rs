// ABOUTME: Todo type definitions
// ABOUTME: Records returned by the repository and the inputs accepted by its mutations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub label: String,
    pub priority: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Labels of the associated tags, sorted; computed at read time
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreateInput {
    pub label: String,
    #[serde(default)]
    pub priority: i32,
}

/// Full replacement of the mutable fields. Tag links are managed separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoUpdateInput {
    pub label: String,
    pub priority: i32,
    pub completed: bool,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.completed.is_none()
    }
}
