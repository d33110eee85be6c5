//! One formatter per top-level clause kind.
//!
//! Every formatter receives the indent in effect before its clause and
//! returns the indent for the next one.

pub mod ordering;
pub mod predicate;
pub mod select;
pub mod source;

use tracing::trace;

use crate::clause::{Clause, ClauseKind};
use crate::error::FormatError;
use crate::line::{Indent, Line};

/// Dispatch a clause to its formatter.
pub fn format_clause(
    clause: &Clause<'_>,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    trace!(kind = ?clause.kind, level = indent.level(), "formatting clause");
    match clause.kind {
        ClauseKind::Select => select::format_select(clause.body, indent, out),
        ClauseKind::From => source::format_from(clause.body, out),
        ClauseKind::Join => source::format_join(clause.keyword, clause.body, indent, out),
        ClauseKind::Where => predicate::format_where(clause.body, indent, out),
        ClauseKind::Having => predicate::format_having(clause.body, indent, out),
        ClauseKind::GroupBy | ClauseKind::OrderBy => {
            ordering::format_list(clause.keyword, clause.body, indent, out)
        }
        ClauseKind::Other => {
            out.push(Line::new(indent, clause.text));
            Ok(indent)
        }
    }
}

/// `text` followed by `suffix`.
pub(crate) fn suffixed(text: &str, suffix: &str) -> String {
    let mut line = String::with_capacity(text.len() + suffix.len());
    line.push_str(text);
    line.push_str(suffix);
    line
}

/// `keyword` and its body on one line, or the bare keyword when the body is empty.
pub(crate) fn keyword_line(keyword: &str, body: &str) -> String {
    if body.is_empty() {
        keyword.to_string()
    } else {
        format!("{keyword} {body}")
    }
}
