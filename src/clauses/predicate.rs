use crate::clauses::{keyword_line, suffixed};
use crate::constructs::{format_in_list, format_subquery};
use crate::error::FormatError;
use crate::line::{Indent, Line};
use crate::string_utils::{contains_keyword, find_ignore_ascii_case, split_ignore_ascii_case};

const AND: &str = " AND ";

/// `WHERE` on its own line, then one condition per line one level in.
///
/// Conditions are found by a flat split on ` AND `, so an `AND` inside
/// parentheses or `BETWEEN … AND …` splits too. A condition containing
/// `SELECT` is a subquery; otherwise one containing ` IN (` is a value list.
pub fn format_where(
    body: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    out.push(Line::new(indent, "WHERE"));
    if body.is_empty() {
        return Ok(indent);
    }

    let conditions = split_ignore_ascii_case(body, AND);
    let condition_indent = indent.deeper();
    let last = conditions.len() - 1;
    for (i, condition) in conditions.iter().enumerate() {
        let condition = condition.trim();
        let separator = if i < last { " AND" } else { "" };
        if contains_keyword(condition, "SELECT") {
            format_subquery(condition, separator, condition_indent, out)?;
        } else if find_ignore_ascii_case(condition, " IN (").is_some() {
            format_in_list(condition, separator, condition_indent, out)?;
        } else {
            out.push(Line::new(condition_indent, suffixed(condition, separator)));
        }
    }

    Ok(indent)
}

/// `HAVING <condition>` on a single line.
pub fn format_having(
    body: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    out.push(Line::new(indent, keyword_line("HAVING", body)));
    Ok(indent)
}
