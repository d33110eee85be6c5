use crate::clauses::suffixed;
use crate::constructs::{format_case, format_window};
use crate::error::FormatError;
use crate::line::{Indent, Line};
use crate::splitter::split_columns;
use crate::string_utils::{contains_keyword, starts_with_keyword};

/// `SELECT` on its own line, then one column per line one level in.
///
/// Columns starting with `CASE` go to the CASE formatter; columns containing
/// `OVER` go to the window-function formatter.
pub fn format_select(
    body: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    out.push(Line::new(indent, "SELECT"));

    let columns = split_columns(body);
    let column_indent = indent.deeper();
    let last = columns.len().saturating_sub(1);
    for (i, column) in columns.iter().enumerate() {
        let separator = if i < last { "," } else { "" };
        if starts_with_keyword(column, "CASE") {
            format_case(column, separator, column_indent, out)?;
        } else if contains_keyword(column, "OVER") {
            format_window(column, separator, column_indent, out)?;
        } else {
            out.push(Line::new(column_indent, suffixed(column, separator)));
        }
    }

    Ok(indent)
}
