// ABOUTME: Database connection management and per-statement timeouts
// ABOUTME: Provides the injected handle every repository is constructed with

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::{debug, info, warn};

use crate::{StorageConfig, StorageError, StorageResult};

/// Owned handle to the SQLite pool plus the statement timeout.
///
/// Cloning is cheap: the pool is reference counted.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Database {
    /// Wrap an existing pool. Migrations are not run.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            query_timeout: StorageConfig::default().query_timeout,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Open the pool described by `config` and bring the schema up to date
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout);

        if !config.is_in_memory() {
            // Ensure parent directory exists
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            if config.enable_wal {
                options = options
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);
            }
        }

        debug!("Connecting to database: {}", config.database_url);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        if config.is_in_memory() {
            // The database lives only as long as its single connection
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        info!("Database connection established");

        sqlx::migrate!("./migrations").run(&pool).await?;

        debug!("Database migrations completed");

        Ok(Self::new(pool).with_query_timeout(config.query_timeout))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run one statement under the configured timeout.
    ///
    /// Dropping the returned future cancels the statement; so does expiry, which
    /// surfaces as [`StorageError::Timeout`].
    pub async fn timed<T, F>(&self, operation: &'static str, statement: F) -> StorageResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, statement).await {
            Ok(result) => result.map_err(StorageError::Sqlx),
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "Query timed out"
                );
                Err(StorageError::Timeout(self.query_timeout))
            }
        }
    }

    /// Round-trip a trivial statement to check the database answers
    pub async fn ping(&self) -> StorageResult<()> {
        self.timed(
            "ping",
            sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&self.pool),
        )
        .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
