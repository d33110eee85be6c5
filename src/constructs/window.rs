use crate::constructs::{closing_line, opening_line};
use crate::error::{context_at, Construct, FormatError};
use crate::line::{Indent, Line};
use crate::string_utils::find_keyword;
use crate::token::matching_close;

/// Lay out `<func> OVER (<spec>)` with the window specification one level in.
///
/// The window spec is searched in fixed order: `PARTITION BY`, then `ORDER BY` in
/// what follows it, then `ROWS` in what follows that. Each piece found gets
/// its own line. Without `PARTITION BY` the whole window spec is a single line.
/// A named window (`OVER w`) is not a parenthesised spec and stays on one line.
pub fn format_window(
    column: &str,
    suffix: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    let Some(over) = find_keyword(column, "OVER") else {
        out.push(Line::new(indent, format!("{column}{suffix}")));
        return Ok(indent);
    };
    let func = column[..over].trim_end();
    let after = column[over + "OVER".len()..].trim_start();
    let open = column.len() - after.len();
    if !after.starts_with('(') {
        out.push(Line::new(indent, format!("{column}{suffix}")));
        return Ok(indent);
    }
    let close = matching_close(column, open).ok_or_else(|| FormatError::UnterminatedConstruct {
        construct: Construct::WindowSpec,
        context: context_at(column, open),
    })?;
    let spec = column[open + 1..close].trim();
    let trailing = column[close + 1..].trim();

    out.push(Line::new(indent, opening_line(func, "OVER")));
    let body = indent.deeper();
    for piece in spec_lines(spec) {
        out.push(Line::new(body, piece));
    }
    out.push(Line::new(indent, closing_line(trailing, suffix)));

    Ok(indent)
}

fn spec_lines(spec: &str) -> Vec<String> {
    let Some(partition_at) = find_keyword(spec, "PARTITION BY") else {
        return if spec.is_empty() {
            Vec::new()
        } else {
            vec![spec.to_string()]
        };
    };

    let mut lines = Vec::new();
    let base = spec[..partition_at].trim();
    if !base.is_empty() {
        lines.push(base.to_string());
    }
    let (partition, order) = split_at_keyword(&spec[partition_at + "PARTITION BY".len()..], "ORDER BY");
    lines.push(keyword_line("PARTITION BY", partition));
    if let Some(order) = order {
        let (order, rows) = split_at_keyword(order, "ROWS");
        lines.push(keyword_line("ORDER BY", order));
        if let Some(rows) = rows {
            lines.push(keyword_line("ROWS", rows));
        }
    }
    lines
}

/// Split at the first whole-word `keyword`, dropping the keyword itself.
fn split_at_keyword<'a>(text: &'a str, keyword: &str) -> (&'a str, Option<&'a str>) {
    match find_keyword(text, keyword) {
        Some(at) => (text[..at].trim(), Some(text[at + keyword.len()..].trim())),
        None => (text.trim(), None),
    }
}

fn keyword_line(keyword: &str, rest: &str) -> String {
    if rest.is_empty() {
        keyword.to_string()
    } else {
        format!("{keyword} {rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(column: &str, suffix: &str) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        let after = format_window(column, suffix, Indent::new(1), &mut out).unwrap();
        assert_eq!(after, Indent::new(1));
        out.into_iter()
            .map(|line| (line.indent.level(), line.text))
            .collect()
    }

    #[test]
    fn test_full_window_spec() {
        assert_eq!(
            render(
                "SUM(x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
                ","
            ),
            [
                (1, "SUM(x) OVER (".to_string()),
                (2, "PARTITION BY a".to_string()),
                (2, "ORDER BY b".to_string()),
                (2, "ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW".to_string()),
                (1, "),".to_string()),
            ]
        );
    }

    #[test]
    fn test_partition_only() {
        let lines = render("row_number() over (partition by a, b) as rn", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["row_number() OVER (", "PARTITION BY a, b", ") as rn"]);
    }

    #[test]
    fn test_without_partition_spec_is_one_line() {
        let lines = render("RANK() OVER (ORDER BY b DESC ROWS UNBOUNDED PRECEDING)", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            ["RANK() OVER (", "ORDER BY b DESC ROWS UNBOUNDED PRECEDING", ")"]
        );
    }

    #[test]
    fn test_empty_spec() {
        let lines = render("COUNT(*) OVER ()", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["COUNT(*) OVER (", ")"]);
    }

    #[test]
    fn test_named_window_is_plain() {
        let lines = render("SUM(x) OVER w", ",");
        assert_eq!(lines, [(1, "SUM(x) OVER w,".to_string())]);
    }

    #[test]
    fn test_over_without_space() {
        let lines = render("SUM(x) OVER(PARTITION BY a)", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["SUM(x) OVER (", "PARTITION BY a", ")"]);
    }
}
