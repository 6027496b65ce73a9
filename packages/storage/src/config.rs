use std::time::Duration;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub busy_timeout: Duration,
    /// Upper bound for a single statement, applied by [`crate::Database::timed`]
    pub query_timeout: Duration,
    pub enable_wal: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:todos.db".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(5),
            enable_wal: true,
        }
    }
}

impl StorageConfig {
    /// Configuration for a private in-memory database (tests, ephemeral runs)
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1, // Each connection would otherwise see its own database
            enable_wal: false,  // WAL mode doesn't work with :memory:
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}
