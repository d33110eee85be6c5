use crate::clauses::suffixed;
use crate::error::FormatError;
use crate::line::{Indent, Line};

/// `GROUP BY` / `ORDER BY` on its own line, then one item per line one level in.
///
/// Items are split on every comma; parentheses are not consulted.
pub fn format_list(
    keyword: &str,
    body: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    out.push(Line::new(indent, keyword));
    if body.is_empty() {
        return Ok(indent);
    }

    let items: Vec<&str> = body.split(',').map(str::trim).collect();
    let item_indent = indent.deeper();
    let last = items.len() - 1;
    for (i, item) in items.iter().enumerate() {
        let separator = if i < last { "," } else { "" };
        out.push(Line::new(item_indent, suffixed(item, separator)));
    }

    Ok(indent)
}
