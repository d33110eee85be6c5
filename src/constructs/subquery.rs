use tracing::debug;

use crate::constructs::{closing_line, opening_line};
use crate::error::{context_at, Construct, FormatError};
use crate::formatter::format_query;
use crate::line::{Indent, Line};
use crate::string_utils::find_keyword;
use crate::token::{enclosing_open, matching_close};

/// Lay out a condition containing a parenthesised `SELECT`.
///
/// The text inside the parentheses around the first `SELECT` is formatted by
/// a fresh, independent pass of the whole engine starting at indent zero; its
/// lines are then shifted one level past `indent` and wrapped between
/// `<prefix> (` and `)`.
pub fn format_subquery(
    condition: &str,
    suffix: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    let open = find_keyword(condition, "SELECT").and_then(|at| enclosing_open(condition, at));
    let Some(open) = open else {
        out.push(Line::new(indent, format!("{condition}{suffix}")));
        return Ok(indent);
    };
    let close = matching_close(condition, open).ok_or_else(|| FormatError::UnterminatedConstruct {
        construct: Construct::Subquery,
        context: context_at(condition, open),
    })?;

    let prefix = condition[..open].trim();
    let interior = condition[open + 1..close].trim();
    let trailing = condition[close + 1..].trim();

    debug!(level = indent.level(), subquery = interior, "formatting nested query");
    let nested = format_query(interior)?;

    out.push(Line::new(indent, opening_line(prefix, "")));
    out.extend(nested.shifted(indent.deeper()));
    out.push(Line::new(indent, closing_line(trailing, suffix)));

    Ok(indent)
}
