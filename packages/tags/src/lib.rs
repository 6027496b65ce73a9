// ABOUTME: Tag management for organizing todos
// ABOUTME: Provides the tag type and storage for tag labels and todo-tag links

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::TagStorage;
pub use types::{Tag, TagCreateInput};
