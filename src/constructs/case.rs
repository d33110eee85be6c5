use crate::error::{context_at, Construct, FormatError};
use crate::line::{Indent, Line};
use crate::token::tokenize;

/// Lay out a `CASE … END` expression.
///
/// `CASE` (with any simple-case operand) opens at `indent`; each `WHEN … THEN …`
/// and `ELSE …` branch gets its own line one level in, and `END` closes at the
/// same deeper level carrying any alias and `suffix`. A CASE nested inside a
/// branch stays on that branch's line.
pub fn format_case(
    expr: &str,
    suffix: &str,
    indent: Indent,
    out: &mut Vec<Line>,
) -> Result<Indent, FormatError> {
    let tokens = tokenize(expr);
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(indent);
    };

    let body = indent.deeper();
    let mut head = format!("CASE{}", first.text.get(4..).unwrap_or_default());
    let mut branches: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;
    let mut nested = 0usize;
    let mut tail: Option<Vec<&str>> = None;

    for token in rest {
        if let Some(tail) = tail.as_mut() {
            tail.push(token.text);
            continue;
        }
        if nested > 0 || !token.nesting.is_top_level() {
            if token.is_keyword("CASE") {
                nested += 1;
            } else if token.is_keyword("END") {
                nested -= 1;
            }
            append(&mut pending, &mut head, token.text);
            continue;
        }

        match token.text.to_ascii_uppercase().as_str() {
            "CASE" => {
                nested += 1;
                append(&mut pending, &mut head, token.text);
            }
            keyword @ ("WHEN" | "ELSE") => {
                branches.extend(pending.take());
                pending = Some(keyword.to_string());
            }
            "THEN" => append(&mut pending, &mut head, "THEN"),
            "END" => {
                branches.extend(pending.take());
                tail = Some(Vec::new());
            }
            _ => append(&mut pending, &mut head, token.text),
        }
    }

    let Some(tail) = tail else {
        return Err(FormatError::UnterminatedConstruct {
            construct: Construct::Case,
            context: context_at(expr, 0),
        });
    };

    out.push(Line::new(indent, head));
    out.extend(branches.into_iter().map(|branch| Line::new(body, branch)));
    let mut end = String::from("END");
    for word in tail {
        end.push(' ');
        end.push_str(word);
    }
    end.push_str(suffix);
    out.push(Line::new(body, end));

    Ok(indent)
}

/// Add a word to the pending branch, or to the `CASE` line before the first branch.
fn append(pending: &mut Option<String>, head: &mut String, word: &str) {
    let line = pending.as_mut().unwrap_or(head);
    line.push(' ');
    line.push_str(word);
}
