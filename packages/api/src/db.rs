// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the database handle and repositories

use std::sync::Arc;
use tracing::info;

use todo_items::TodoStorage;
use todo_storage::{Database, StorageConfig, StorageResult};
use todo_tags::TagStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub db: Database,
    pub todo_storage: Arc<TodoStorage>,
    pub tag_storage: Arc<TagStorage>,
}

impl DbState {
    /// Create new database state from an already migrated database handle
    pub fn new(db: Database) -> Self {
        let todo_storage = Arc::new(TodoStorage::new(db.clone()));
        let tag_storage = Arc::new(TagStorage::new(db.clone()));

        Self {
            db,
            todo_storage,
            tag_storage,
        }
    }

    /// Connect, run migrations and build the repositories
    pub async fn init(config: &StorageConfig) -> StorageResult<Self> {
        let db = Database::connect(config).await?;

        info!(
            "Database ready (max connections: {}, query timeout: {:?})",
            config.max_connections, config.query_timeout
        );

        Ok(Self::new(db))
    }
}
