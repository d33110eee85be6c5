use crate::clauses::keyword_line;
use crate::error::FormatError;
use crate::line::{Indent, Line};
use crate::string_utils::{find_ignore_ascii_case, keyword_positions};

const ON: &str = " ON ";

/// `FROM <source>` on one line. Starts a fresh block at indent zero.
pub fn format_from(body: &str, out: &mut Vec<Line>) -> Result<Indent, FormatError> {
    out.push(Line::new(Indent::ZERO, keyword_line("FROM", body)));
    Ok(Indent::ZERO)
}

/// `<KIND> JOIN <target>` then `ON <condition>`, split at the first ` ON `.
///
/// A target containing `SELECT` is broken before each `SELECT`, with the
/// broken-off text one level in.
pub fn format_join(
    keyword: &str,
    body: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    let (target, condition) = match find_ignore_ascii_case(body, ON) {
        Some(at) => (body[..at].trim(), Some(body[at + ON.len()..].trim())),
        None => (body, None),
    };

    let head = keyword_line(keyword, target);
    let breaks = keyword_positions(&head, "SELECT");
    let mut start = 0;
    for &at in &breaks {
        let piece = head[start..at].trim();
        if !piece.is_empty() {
            let level = if start == 0 { indent } else { indent.deeper() };
            out.push(Line::new(level, piece));
        }
        start = at;
    }
    let level = if start == 0 { indent } else { indent.deeper() };
    out.push(Line::new(level, head[start..].trim()));

    if let Some(condition) = condition {
        out.push(Line::new(indent, keyword_line("ON", condition)));
    }

    Ok(indent)
}
