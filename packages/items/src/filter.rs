// ABOUTME: Optional-criteria filter for listing todos
// ABOUTME: Compiles completion, priority range and full-text constraints into a WHERE predicate

/// One independent filter constraint.
///
/// Applying an option sets exactly one field of a [`TodoFilter`]; applying the
/// same kind twice keeps the last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOption {
    Completed(bool),
    PriorityMin(i32),
    PriorityMax(i32),
    Fulltext(String),
}

/// Filter criteria for listing todos.
///
/// Every field is optional and all set fields are combined with AND. An empty
/// filter matches every todo. Values must already be validated: the full-text
/// term is expected to be non-empty with at least three characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    completed: Option<bool>,
    priority_min: Option<i32>,
    priority_max: Option<i32>,
    fulltext: Option<String>,
}

/// A compiled filter: the predicate without the `WHERE` keyword and the
/// values for its numbered placeholders, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    pub clause: String,
    pub params: Vec<String>,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// `" WHERE <clause>"`, or an empty string when there is nothing to filter on
    pub fn where_clause(&self) -> String {
        if self.clause.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

impl TodoFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: impl IntoIterator<Item = FilterOption>) -> Self {
        let mut filter = Self::new();
        for option in options {
            filter.apply(option);
        }
        filter
    }

    pub fn apply(&mut self, option: FilterOption) {
        match option {
            FilterOption::Completed(value) => self.completed = Some(value),
            FilterOption::PriorityMin(min) => self.priority_min = Some(min),
            FilterOption::PriorityMax(max) => self.priority_max = Some(max),
            FilterOption::Fulltext(term) => self.fulltext = Some(term),
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.apply(FilterOption::Completed(completed));
        self
    }

    pub fn with_priority_min(mut self, min: i32) -> Self {
        self.apply(FilterOption::PriorityMin(min));
        self
    }

    pub fn with_priority_max(mut self, max: i32) -> Self {
        self.apply(FilterOption::PriorityMax(max));
        self
    }

    pub fn with_fulltext(mut self, term: impl Into<String>) -> Self {
        self.apply(FilterOption::Fulltext(term.into()));
        self
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }

    pub fn priority_min(&self) -> Option<i32> {
        self.priority_min
    }

    pub fn priority_max(&self) -> Option<i32> {
        self.priority_max
    }

    pub fn fulltext(&self) -> Option<&str> {
        self.fulltext.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_none()
            && self.priority_min.is_none()
            && self.priority_max.is_none()
            && self.fulltext.is_none()
    }

    /// Compile into a SQLite predicate.
    ///
    /// Clause order is fixed: completion, priority, full-text. Booleans and
    /// integers are interpolated; only the free-text term is bound, as `?1`,
    /// after conversion by [`fts_phrase_query`].
    pub fn to_sql(&self) -> CompiledFilter {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(completed) = self.completed {
            conditions.push(format!(
                "completed = {}",
                if completed { "TRUE" } else { "FALSE" }
            ));
        }

        match (self.priority_min, self.priority_max) {
            (Some(min), Some(max)) => {
                conditions.push(format!("priority BETWEEN {} AND {}", min, max))
            }
            (Some(min), None) => conditions.push(format!("priority >= {}", min)),
            (None, Some(max)) => conditions.push(format!("priority <= {}", max)),
            (None, None) => {}
        }

        if let Some(term) = &self.fulltext {
            params.push(fts_phrase_query(term));
            conditions.push(format!(
                "id IN (SELECT rowid FROM todos_fts WHERE todos_fts MATCH ?{})",
                params.len()
            ));
        }

        CompiledFilter {
            clause: conditions.join(" AND "),
            params,
        }
    }
}

/// Turn free text into an FTS5 query that matches it literally.
///
/// Every whitespace-separated word becomes a quoted phrase (embedded `"`
/// doubled) and the phrases are joined with spaces, which FTS5 reads as AND.
/// Punctuation and operator keywords such as `NEAR`, `OR`, `*` or `label:`
/// therefore never reach the FTS5 query parser as syntax.
pub fn fts_phrase_query(term: &str) -> String {
    term.split_whitespace()
        .map(|word| format!("\"{}\"", word.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}
