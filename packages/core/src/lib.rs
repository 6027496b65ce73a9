// ABOUTME: Core validation rules for the todo service
// ABOUTME: Foundational package shared by storage, repositories and the HTTP layer

pub mod validation;

// Re-export validation
pub use validation::{
    normalize_label, parse_bool, parse_priority, validate_fulltext, validate_label,
    validate_priority_range, ValidationError, MIN_FULLTEXT_LEN,
};
