// ABOUTME: Data layer and persistence for the todo service
// ABOUTME: Owns the SQLite pool handle, schema migrations and the shared storage error type

use std::time::Duration;

use thiserror::Error;
use todo_core::ValidationError;

pub mod config;
pub mod database;

pub use config::StorageConfig;
pub use database::Database;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Record not found")]
    NotFound,
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Coarse classification of a [`StorageError`] for callers that only need to
/// decide between "bad input", "missing record" and "storage failure".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Query,
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Validation(_) => ErrorKind::Validation,
            StorageError::NotFound => ErrorKind::NotFound,
            StorageError::Sqlx(_)
            | StorageError::Migration(_)
            | StorageError::Io(_)
            | StorageError::Json(_)
            | StorageError::Timeout(_) => ErrorKind::Query,
        }
    }
}
