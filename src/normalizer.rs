use crate::error::{context_at, Construct, FormatError};
use crate::query::STATEMENT_TERMINATOR;
use crate::string_utils::is_word_byte;
use crate::token::{word_end, Nesting};

/// Collapse every whitespace run to one space and trim both ends.
///
/// Lossy: line breaks and repeated spaces inside string literals are collapsed too.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop one trailing statement terminator, so formatted output can be fed back in.
pub fn strip_terminator(normalized: &str) -> &str {
    normalized
        .strip_suffix(STATEMENT_TERMINATOR)
        .map_or(normalized, str::trim_end)
}

/// Reject input the clause formatters would otherwise garble: unbalanced
/// parentheses, unterminated string literals or CASE expressions, and a
/// statement separator before the end of input.
pub fn validate(statement: &str) -> Result<(), FormatError> {
    let bytes = statement.as_bytes();
    let mut nesting = Nesting::default();
    let mut open_parens: Vec<usize> = Vec::new();
    let mut open_cases: Vec<usize> = Vec::new();
    let mut quote_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if !nesting.in_quote() {
            if is_word_byte(byte) {
                let end = word_end(bytes, i);
                let word = &statement[i..end];
                if word.eq_ignore_ascii_case("CASE") {
                    open_cases.push(i);
                } else if word.eq_ignore_ascii_case("END") {
                    open_cases.pop();
                }
                i = end;
                continue;
            }
            match byte {
                b'(' => open_parens.push(i),
                b')' => {
                    if open_parens.pop().is_none() {
                        return Err(FormatError::UnbalancedParentheses { position: i });
                    }
                }
                b';' if nesting.depth() == 0 => {
                    return Err(FormatError::MultiStatementInput { position: i });
                }
                b'\'' | b'"' | b'`' => quote_start = i,
                _ => {}
            }
        }
        nesting = nesting.step(byte);
        i += 1;
    }

    if nesting.in_quote() {
        return Err(FormatError::UnterminatedConstruct {
            construct: Construct::StringLiteral,
            context: context_at(statement, quote_start),
        });
    }
    if let Some(&position) = open_parens.first() {
        return Err(FormatError::UnbalancedParentheses { position });
    }
    if let Some(&position) = open_cases.first() {
        return Err(FormatError::UnterminatedConstruct {
            construct: Construct::Case,
            context: context_at(statement, position),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize("  SELECT a,\n\tb\r\n  FROM   t  "),
            "SELECT a, b FROM t"
        );
    }

    #[test]
    fn test_normalize_is_lossy_inside_literals() {
        assert_eq!(normalize("SELECT 'a\n   b'"), "SELECT 'a b'");
    }

    #[test]
    fn test_strip_terminator_once() {
        assert_eq!(strip_terminator("SELECT a ;"), "SELECT a");
        assert_eq!(strip_terminator("SELECT a;;"), "SELECT a;");
        assert_eq!(strip_terminator("SELECT a"), "SELECT a");
    }

    #[test]
    fn test_validate_accepts_nested_input() {
        assert!(validate("SELECT CASE WHEN a IN (1, 2) THEN ';' END FROM t").is_ok());
        assert!(validate("SELECT f((a)) FROM t WHERE x = ')'").is_ok());
    }

    #[test]
    fn test_validate_stray_close_paren() {
        assert_eq!(
            validate("SELECT a) FROM t"),
            Err(FormatError::UnbalancedParentheses { position: 8 })
        );
    }

    #[test]
    fn test_validate_unclosed_paren() {
        assert_eq!(
            validate("SELECT f(a FROM t"),
            Err(FormatError::UnbalancedParentheses { position: 8 })
        );
    }

    #[test]
    fn test_validate_case_without_end() {
        let err = validate("SELECT CASE WHEN a THEN 1 FROM t").unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnterminatedConstruct {
                construct: Construct::Case,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_unterminated_string() {
        let err = validate("SELECT 'abc FROM t").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnterminatedConstruct {
                construct: Construct::StringLiteral,
                context: "'abc FROM t".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_second_statement() {
        assert_eq!(
            validate("SELECT 1; SELECT 2"),
            Err(FormatError::MultiStatementInput { position: 8 })
        );
    }
}
