// ABOUTME: Input validation for todo labels, tag labels and list filters
// ABOUTME: Rejects malformed values before they reach the query builder or storage

use thiserror::Error;

/// Minimum length (in characters, after trimming) of a full-text search term
pub const MIN_FULLTEXT_LEN: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyLabel(&'static str),
    #[error("{0} contains invalid null bytes")]
    NullBytes(&'static str),
    #[error("Query too short, at least {min} characters required (got {got})")]
    FulltextTooShort { min: usize, got: usize },
    #[error("Invalid bool format for {field}: {value}")]
    InvalidBool { field: &'static str, value: String },
    #[error("Invalid int format for {field}: {value}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("Priority range is inverted: min {min} is greater than max {max}")]
    InvertedPriorityRange { min: i32, max: i32 },
}

/// Canonical form of a label as stored and looked up
pub fn normalize_label(label: &str) -> &str {
    label.trim()
}

/// Validate a todo or tag label and return it normalized
pub fn validate_label(field: &'static str, label: &str) -> Result<String, ValidationError> {
    let trimmed = normalize_label(label);

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyLabel(field));
    }

    if trimmed.contains('\0') {
        return Err(ValidationError::NullBytes(field));
    }

    Ok(trimmed.to_string())
}

/// Validate a full-text search term.
///
/// Length is counted in characters, not bytes, so multi-byte terms such as
/// "äöü" are accepted.
pub fn validate_fulltext(term: &str) -> Result<String, ValidationError> {
    let trimmed = term.trim();
    let got = trimmed.chars().count();

    if got < MIN_FULLTEXT_LEN {
        return Err(ValidationError::FulltextTooShort {
            min: MIN_FULLTEXT_LEN,
            got,
        });
    }

    if trimmed.contains('\0') {
        return Err(ValidationError::NullBytes("Full-text query"));
    }

    Ok(trimmed.to_string())
}

/// Parse a strict boolean query value; only `true` and `false` are accepted
pub fn parse_bool(field: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ValidationError::InvalidBool {
            field,
            value: other.to_string(),
        }),
    }
}

/// Parse a priority bound from a query value
pub fn parse_priority(field: &'static str, value: &str) -> Result<i32, ValidationError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

/// Reject a priority range whose lower bound exceeds its upper bound.
///
/// Priorities themselves are unbounded; only the ordering of the two bounds is checked.
pub fn validate_priority_range(min: Option<i32>, max: Option<i32>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(ValidationError::InvertedPriorityRange { min, max })
        }
        _ => Ok(()),
    }
}
