// ABOUTME: Tag storage layer using SQLite
// ABOUTME: Idempotent tag creation plus adding and removing todo-tag links

use tracing::debug;

use todo_core::{normalize_label, validate_label};
use todo_storage::{Database, StorageResult};

use super::types::Tag;

pub struct TagStorage {
    db: Database,
}

impl TagStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a tag if no tag with this label exists.
    ///
    /// Returns 1 when a tag was created and 0 when the label already existed;
    /// a duplicate is not an error.
    pub async fn create_tag(&self, label: &str) -> StorageResult<u64> {
        let label = validate_label("Tag label", label)?;

        debug!("Creating tag: {}", label);

        let result = self
            .db
            .timed(
                "create_tag",
                sqlx::query("INSERT INTO tags (label) VALUES (?) ON CONFLICT (label) DO NOTHING")
                    .bind(&label)
                    .execute(self.db.pool()),
            )
            .await?;

        Ok(result.rows_affected())
    }

    /// All tag labels, alphabetically
    pub async fn list_tags(&self) -> StorageResult<Vec<String>> {
        debug!("Fetching tag labels");

        self.db
            .timed(
                "list_tags",
                sqlx::query_scalar::<_, String>("SELECT label FROM tags ORDER BY label")
                    .fetch_all(self.db.pool()),
            )
            .await
    }

    /// Get a tag by label. Labels are normalized the same way on every lookup.
    pub async fn get_tag_by_label(&self, label: &str) -> StorageResult<Option<Tag>> {
        let label = normalize_label(label);
        debug!("Fetching tag by label: {}", label);

        self.db
            .timed(
                "get_tag_by_label",
                sqlx::query_as::<_, Tag>("SELECT id, label FROM tags WHERE label = ?")
                    .bind(label)
                    .fetch_optional(self.db.pool()),
            )
            .await
    }

    /// Link a todo to the tag with `label`.
    ///
    /// Returns the number of links created: 0 when the label is unknown or the
    /// link already exists. A todo id that does not exist violates the foreign
    /// key and is reported as a query error.
    pub async fn add_item_tag(&self, todo_id: i64, label: &str) -> StorageResult<u64> {
        let label = normalize_label(label);
        debug!("Adding tag '{}' to todo {}", label, todo_id);

        let result = self
            .db
            .timed(
                "add_item_tag",
                sqlx::query(
                    r#"
                    INSERT INTO tagged (item_id, tag_id)
                    SELECT ?, id FROM tags WHERE label = ?
                    ON CONFLICT (item_id, tag_id) DO NOTHING
                    "#,
                )
                .bind(todo_id)
                .bind(label)
                .execute(self.db.pool()),
            )
            .await?;

        if result.rows_affected() == 0 {
            debug!(
                "Tag '{}' not linked to todo {} (unknown label or already linked)",
                label, todo_id
            );
        }

        Ok(result.rows_affected())
    }

    /// Unlink a todo from the tag with `label`; returns the number of links removed
    pub async fn remove_item_tag(&self, todo_id: i64, label: &str) -> StorageResult<u64> {
        let label = normalize_label(label);
        debug!("Removing tag '{}' from todo {}", label, todo_id);

        let result = self
            .db
            .timed(
                "remove_item_tag",
                sqlx::query(
                    r#"
                    DELETE FROM tagged
                    WHERE item_id = ?
                    AND tag_id = (SELECT id FROM tags WHERE label = ?)
                    "#,
                )
                .bind(todo_id)
                .bind(label)
                .execute(self.db.pool()),
            )
            .await?;

        Ok(result.rows_affected())
    }
}
