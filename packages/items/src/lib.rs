// ABOUTME: Todo management with optional filtering and read-time tag aggregation
// ABOUTME: Provides the todo types, the list filter compiler and the SQLite repository

pub mod filter;
pub mod storage;
pub mod types;

pub use filter::{fts_phrase_query, CompiledFilter, FilterOption, TodoFilter};
pub use storage::TodoStorage;
pub use types::*;
