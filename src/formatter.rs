use tracing::debug;

use crate::clauses::format_clause;
use crate::error::FormatError;
use crate::line::Indent;
use crate::normalizer::{normalize, strip_terminator, validate};
use crate::query::Query;
use crate::splitter::split_clauses;

/// Spaces per indent level unless configured otherwise.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Format a single SQL statement with the default indent width.
///
/// ```
/// let formatted = sqlclause::format("select a, b from t where x = 1").unwrap();
/// assert_eq!(formatted, "SELECT\n    a,\n    b\nFROM t\nWHERE\n    x = 1;");
/// ```
pub fn format(text: &str) -> Result<String, FormatError> {
    QueryFormatter::default().format(text)
}

/// Run the engine over one statement: normalize, validate, split into
/// clauses and lay out each clause in order, starting from indent zero.
///
/// Subqueries call back into this function with their interior text; every
/// call owns its indent, so nothing leaks between passes.
pub fn format_query(text: &str) -> Result<Query, FormatError> {
    let normalized = normalize(text);
    let statement = strip_terminator(&normalized);
    if statement.is_empty() {
        return Err(FormatError::EmptyInput);
    }
    validate(statement)?;

    let clauses = split_clauses(statement);
    debug!(clauses = clauses.len(), len = statement.len(), "split statement into clauses");

    let mut lines = Vec::new();
    let mut indent = Indent::ZERO;
    for clause in &clauses {
        indent = format_clause(clause, indent, &mut lines)?;
    }
    Ok(Query::new(lines))
}

/// Renders formatted statements with a configurable indent width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFormatter {
    indent_width: usize,
}

impl QueryFormatter {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Format `text` and terminate it with a single `;`.
    pub fn format(&self, text: &str) -> Result<String, FormatError> {
        Ok(format_query(text)?.render_statement(self.indent_width))
    }
}

impl Default for QueryFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}
