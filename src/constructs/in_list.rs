use crate::constructs::{closing_line, opening_line};
use crate::error::{context_at, Construct, FormatError};
use crate::line::{Indent, Line};
use crate::string_utils::find_ignore_ascii_case;
use crate::token::matching_close;

const IN_OPEN: &str = " IN (";

/// Lay out `<prefix> IN (v1, v2, …)` with one value per line.
///
/// Values are split on every comma up to the matching `)`; the split does not
/// look inside nested parentheses or literals.
pub fn format_in_list(
    condition: &str,
    suffix: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    let Some(at) = find_ignore_ascii_case(condition, IN_OPEN) else {
        out.push(Line::new(indent, format!("{condition}{suffix}")));
        return Ok(indent);
    };
    let open = at + IN_OPEN.len() - 1;
    let close = matching_close(condition, open).ok_or_else(|| FormatError::UnterminatedConstruct {
        construct: Construct::InList,
        context: context_at(condition, at + 1),
    })?;

    let prefix = condition[..at].trim();
    let list = condition[open + 1..close].trim();
    let trailing = condition[close + 1..].trim();

    out.push(Line::new(indent, opening_line(prefix, "IN")));
    if !list.is_empty() {
        let values: Vec<&str> = list.split(',').map(str::trim).collect();
        let body = indent.deeper();
        let last = values.len() - 1;
        for (i, value) in values.iter().enumerate() {
            let separator = if i < last { "," } else { "" };
            out.push(Line::new(body, format!("{value}{separator}")));
        }
    }
    out.push(Line::new(indent, closing_line(trailing, suffix)));

    Ok(indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(condition: &str, suffix: &str) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        let after = format_in_list(condition, suffix, Indent::new(1), &mut out).unwrap();
        assert_eq!(after, Indent::new(1));
        out.into_iter()
            .map(|line| (line.indent.level(), line.text))
            .collect()
    }

    #[test]
    fn test_value_per_line() {
        assert_eq!(
            render("status IN ('a', 'b', 'c')", " AND"),
            [
                (1, "status IN (".to_string()),
                (2, "'a',".to_string()),
                (2, "'b',".to_string()),
                (2, "'c'".to_string()),
                (1, ") AND".to_string()),
            ]
        );
    }

    #[test]
    fn test_not_in_keeps_prefix() {
        let lines = render("x not in (1,2)", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["x not IN (", "1,", "2", ")"]);
    }

    #[test]
    fn test_split_is_flat_inside_values() {
        let lines = render("x IN (f(1, 2), 3)", "");
        let texts: Vec<_> = lines.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["x IN (", "f(1,", "2),", "3", ")"]);
    }

    #[test]
    fn test_unclosed_list_is_an_error() {
        let mut out = Vec::new();
        let err = format_in_list("x IN (1, 2", "", Indent::ZERO, &mut out).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnterminatedConstruct {
                construct: Construct::InList,
                ..
            }
        ));
    }
}
