use crate::line::{Indent, Line};

/// Ends every formatted statement.
pub const STATEMENT_TERMINATOR: char = ';';

/// The formatted lines of one statement, before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub lines: Vec<Line>,
}

impl Query {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Re-indent every line by `by` levels, for embedding inside another statement.
    pub fn shifted(self, by: Indent) -> impl Iterator<Item = Line> {
        self.lines.into_iter().map(move |line| line.shifted(by))
    }

    /// Render the lines joined by newlines, without a terminator.
    pub fn render(&self, indent_width: usize) -> String {
        self.lines
            .iter()
            .map(|line| line.render(indent_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the full statement, terminated by a single `;`.
    pub fn render_statement(&self, indent_width: usize) -> String {
        let mut result = self.render(indent_width);
        let trimmed = result.trim_end().len();
        result.truncate(trimmed);
        result.push(STATEMENT_TERMINATOR);
        result
    }
}
