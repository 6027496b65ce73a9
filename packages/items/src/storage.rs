// ABOUTME: Todo storage layer using SQLite
// ABOUTME: Handles filtered listing and CRUD for todos with read-time tag aggregation

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;

use todo_core::{normalize_label, validate_label};
use todo_storage::{Database, StorageError, StorageResult};

use crate::filter::TodoFilter;
use crate::types::{Todo, TodoCreateInput, TodoPatch, TodoUpdateInput};

/// Todo columns plus the sorted tag labels as a JSON array
const SELECT_TODOS: &str = r#"
    SELECT
        todos.id,
        todos.label,
        todos.priority,
        todos.completed,
        todos.created_at,
        todos.modified_at,
        (
            SELECT json_group_array(label) FROM (
                SELECT tags.label AS label
                FROM tags
                JOIN tagged ON tagged.tag_id = tags.id
                WHERE tagged.item_id = todos.id
                ORDER BY tags.label
            )
        ) AS tags
    FROM todos"#;

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    label: String,
    priority: i32,
    completed: bool,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    #[sqlx(default)]
    tags: Option<String>,
}

impl TodoRow {
    fn into_todo(self) -> StorageResult<Todo> {
        let mut tags: Vec<String> = match self.tags {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        // Aggregate input order is not guaranteed by SQLite
        tags.sort();

        Ok(Todo {
            id: self.id,
            label: self.label,
            priority: self.priority,
            completed: self.completed,
            created_at: self.created_at,
            modified_at: self.modified_at,
            tags,
        })
    }
}

pub struct TodoStorage {
    db: Database,
}

impl TodoStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List todos matching `filter`; an empty filter lists everything
    pub async fn list_todos(&self, filter: &TodoFilter) -> StorageResult<Vec<Todo>> {
        let compiled = filter.to_sql();
        let query_str = format!(
            "{}{} ORDER BY todos.id",
            SELECT_TODOS,
            compiled.where_clause()
        );

        debug!(
            "Listing todos (filter: {:?}, params: {})",
            compiled.clause,
            compiled.params.len()
        );

        let mut query = sqlx::query_as::<_, TodoRow>(&query_str);
        for param in &compiled.params {
            query = query.bind(param);
        }

        let rows = self
            .db
            .timed("list_todos", query.fetch_all(self.db.pool()))
            .await?;

        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    /// List todos linked to the tag with the given label.
    ///
    /// An unknown or unused label yields an empty list.
    pub async fn list_todos_by_tag(&self, label: &str) -> StorageResult<Vec<Todo>> {
        let label = normalize_label(label);
        debug!("Listing todos by tag: {}", label);

        let query_str = format!(
            r#"{}
            WHERE EXISTS (
                SELECT 1
                FROM tagged
                JOIN tags ON tags.id = tagged.tag_id
                WHERE tagged.item_id = todos.id
                AND tags.label = ?
            )
            ORDER BY todos.id"#,
            SELECT_TODOS
        );

        let rows = self
            .db
            .timed(
                "list_todos_by_tag",
                sqlx::query_as::<_, TodoRow>(&query_str)
                    .bind(label)
                    .fetch_all(self.db.pool()),
            )
            .await?;

        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    pub async fn get_todo(&self, id: i64) -> StorageResult<Todo> {
        debug!("Fetching todo: {}", id);

        let query_str = format!("{} WHERE todos.id = ?", SELECT_TODOS);

        let row = self
            .db
            .timed(
                "get_todo",
                sqlx::query_as::<_, TodoRow>(&query_str)
                    .bind(id)
                    .fetch_optional(self.db.pool()),
            )
            .await?;

        row.ok_or(StorageError::NotFound)?.into_todo()
    }

    /// Insert a new, not yet completed todo. Id and timestamps come from storage.
    pub async fn create_todo(&self, input: TodoCreateInput) -> StorageResult<Todo> {
        let label = validate_label("Label", &input.label)?;

        let row = self
            .db
            .timed(
                "create_todo",
                sqlx::query_as::<_, TodoRow>(
                    r#"
                    INSERT INTO todos (label, priority, completed)
                    VALUES (?, ?, FALSE)
                    RETURNING id, label, priority, completed, created_at, modified_at
                    "#,
                )
                .bind(&label)
                .bind(input.priority)
                .fetch_one(self.db.pool()),
            )
            .await?;

        debug!("Created todo id={} (label: {})", row.id, row.label);

        row.into_todo()
    }

    /// Replace label, priority and completion of an existing todo.
    ///
    /// Tag links are not touched.
    pub async fn update_todo(&self, id: i64, input: TodoUpdateInput) -> StorageResult<Todo> {
        let label = validate_label("Label", &input.label)?;

        debug!("Updating todo: {}", id);

        let updated = self
            .db
            .timed(
                "update_todo",
                sqlx::query_scalar::<_, i64>(
                    r#"
                    UPDATE todos
                    SET label = ?,
                        priority = ?,
                        completed = ?,
                        modified_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                    WHERE id = ?
                    RETURNING id
                    "#,
                )
                .bind(&label)
                .bind(input.priority)
                .bind(input.completed)
                .bind(id)
                .fetch_optional(self.db.pool()),
            )
            .await?;

        if updated.is_none() {
            return Err(StorageError::NotFound);
        }

        self.get_todo(id).await
    }

    /// Apply the fields present in `patch`; returns the number of rows changed.
    ///
    /// An empty patch issues no query and reports 0.
    pub async fn patch_todo(&self, id: i64, patch: TodoPatch) -> StorageResult<u64> {
        if patch.is_empty() {
            debug!("Empty patch for todo {}, nothing to do", id);
            return Ok(0);
        }

        // One SET clause per provided field
        let mut query_parts = Vec::new();

        if patch.completed.is_some() {
            query_parts.push("completed = ?");
        }
        query_parts.push("modified_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");

        let query_str = format!("UPDATE todos SET {} WHERE id = ?", query_parts.join(", "));
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        if let Some(completed) = patch.completed {
            query = query.bind(completed);
        }
        query = query.bind(id);

        let result = self
            .db
            .timed("patch_todo", query.execute(self.db.pool()))
            .await?;

        debug!("Patched todo {} ({} rows)", id, result.rows_affected());

        Ok(result.rows_affected())
    }

    /// Delete a todo; deleting a missing id succeeds and reports 0 rows
    pub async fn delete_todo(&self, id: i64) -> StorageResult<u64> {
        let result = self
            .db
            .timed(
                "delete_todo",
                sqlx::query("DELETE FROM todos WHERE id = ?")
                    .bind(id)
                    .execute(self.db.pool()),
            )
            .await?;

        debug!("Deleted todo {} ({} rows)", id, result.rows_affected());

        Ok(result.rows_affected())
    }
}
