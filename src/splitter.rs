use tracing::trace;

use crate::clause::{boundary_keyword, Clause, ClauseKind};
use crate::string_utils::{is_word_byte, Pieces};
use crate::token::{tokenize, word_end, Nesting, Token};

/// ClauseSplitter: partition a normalized statement into clauses.
///
/// A new clause starts at every boundary keyword whose first token sits at
/// parenthesis depth 0 outside quotes, so subquery bodies stay inside the
/// clause that contains them. Clauses cover the input in order with no gaps.
pub fn split_clauses(statement: &str) -> Vec<Clause<'_>> {
    let tokens = tokenize(statement);
    let mut starts: Vec<(usize, Option<(&'static str, ClauseKind)>)> = Vec::new();

    for i in 0..tokens.len() {
        match boundary_at(&tokens, i) {
            Some(found) => starts.push((tokens[i].offset, Some(found))),
            None if i == 0 => starts.push((0, None)),
            None => {}
        }
    }

    let mut clauses = Vec::with_capacity(starts.len());
    for (n, &(start, found)) in starts.iter().enumerate() {
        let end = starts.get(n + 1).map_or(statement.len(), |&(next, _)| next);
        let text = statement[start..end].trim();
        let clause = match found {
            Some((keyword, kind)) => Clause::new(kind, keyword, text),
            None => Clause::other(text),
        };
        trace!(kind = ?clause.kind, text = clause.text, "clause");
        clauses.push(clause);
    }
    clauses
}

/// The boundary keyword starting at token `i`, checking the two-word form first.
fn boundary_at(tokens: &[Token<'_>], i: usize) -> Option<(&'static str, ClauseKind)> {
    let token = tokens[i];
    if !token.nesting.is_top_level() {
        return None;
    }
    if let Some(next) = tokens.get(i + 1) {
        let pair = format!("{} {}", token.text, next.text);
        if let Some(found) = boundary_keyword(&pair) {
            return Some(found);
        }
    }
    boundary_keyword(token.text)
}

/// ColumnSplitter: split a comma-delimited expression list at top-level commas.
///
/// A comma separates only outside parentheses, quoted literals and
/// `CASE … END` spans, and only when the next word is not `OVER`. The `OVER`
/// rule is a blunt heuristic: it skips any comma followed by `OVER`.
pub fn split_columns(list: &str) -> Pieces<'_> {
    let bytes = list.as_bytes();
    let mut columns = Pieces::new();
    let mut nesting = Nesting::default();
    let mut case_depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if !nesting.in_quote() && is_word_byte(byte) {
            let end = word_end(bytes, i);
            let word = &list[i..end];
            if word.eq_ignore_ascii_case("CASE") {
                case_depth += 1;
            } else if word.eq_ignore_ascii_case("END") {
                case_depth = case_depth.saturating_sub(1);
            }
            i = end;
            continue;
        }
        if byte == b','
            && nesting.is_top_level()
            && case_depth == 0
            && !next_word_is(list, i + 1, "OVER")
        {
            columns.push(list[start..i].trim());
            start = i + 1;
        }
        nesting = nesting.step(byte);
        i += 1;
    }

    let last = list[start..].trim();
    if !last.is_empty() || !columns.is_empty() {
        columns.push(last);
    }
    columns
}

fn next_word_is(text: &str, from: usize, word: &str) -> bool {
    let rest = text[from..].trim_start();
    let bytes = rest.as_bytes();
    if bytes.first().map_or(true, |&b| !is_word_byte(b)) {
        return false;
    }
    rest[..word_end(bytes, 0)].eq_ignore_ascii_case(word)
}
