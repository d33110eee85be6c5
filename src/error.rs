use std::fmt;

use thiserror::Error;

/// A bounded syntactic shape the formatter tracks while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    StringLiteral,
    Case,
    Subquery,
    InList,
    WindowSpec,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::StringLiteral => "string literal",
            Construct::Case => "CASE expression",
            Construct::Subquery => "subquery",
            Construct::InList => "IN list",
            Construct::WindowSpec => "window specification",
        };
        f.write_str(name)
    }
}

/// Faults raised by the formatting engine in place of garbled output.
///
/// Positions are byte offsets into the whitespace-normalized statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("nothing to format")]
    EmptyInput,

    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    #[error("unterminated {construct} near `{context}`")]
    UnterminatedConstruct { construct: Construct, context: String },

    #[error("statement separator at position {position} before end of input")]
    MultiStatementInput { position: usize },
}

/// User-facing errors.
#[derive(Error, Debug)]
pub enum SqlclauseError {
    #[error("sqlclause format error: {0}")]
    Format(#[from] FormatError),

    #[error("sqlclause config error: {0}")]
    Config(String),

    #[error("sqlclause equivalence error: {0}")]
    Equivalence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SqlclauseError>;

/// Up to 24 characters of `text` starting at byte `position`, for error messages.
pub(crate) fn context_at(text: &str, position: usize) -> String {
    text.get(position..)
        .unwrap_or_default()
        .chars()
        .take(24)
        .collect()
}
