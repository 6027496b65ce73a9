// ABOUTME: Query-string parsing for the todo list endpoint
// ABOUTME: Validates raw parameters and turns them into a TodoFilter

use serde::Deserialize;

use todo_core::{
    parse_bool, parse_priority, validate_fulltext, validate_priority_range, ValidationError,
};
use todo_items::{FilterOption, TodoFilter};

/// Raw `GET /todos` parameters.
///
/// Values are kept as strings so that a malformed value is reported as a
/// validation error instead of a generic extractor rejection. A parameter that
/// is present with an empty value is still validated.
#[derive(Debug, Default, Deserialize)]
pub struct TodoListQuery {
    pub completed: Option<String>,
    pub prioritymin: Option<String>,
    pub prioritymax: Option<String>,
    pub fulltext: Option<String>,
}

impl TodoListQuery {
    pub fn into_filter(self) -> Result<TodoFilter, ValidationError> {
        let mut options = Vec::new();

        if let Some(value) = &self.completed {
            options.push(FilterOption::Completed(parse_bool("completed", value)?));
        }

        let min = self
            .prioritymin
            .as_deref()
            .map(|value| parse_priority("prioritymin", value))
            .transpose()?;
        let max = self
            .prioritymax
            .as_deref()
            .map(|value| parse_priority("prioritymax", value))
            .transpose()?;
        validate_priority_range(min, max)?;

        options.extend(min.map(FilterOption::PriorityMin));
        options.extend(max.map(FilterOption::PriorityMax));

        if let Some(term) = &self.fulltext {
            options.push(FilterOption::Fulltext(validate_fulltext(term)?));
        }

        Ok(TodoFilter::from_options(options))
    }
}
