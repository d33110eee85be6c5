//! Formatters for bounded shapes nested inside a clause: CASE expressions,
//! window functions, subqueries and `IN` value lists.
//!
//! Each takes the indent of its first line, appends its lines to `out`, and
//! returns the indent in effect afterwards, which is always the one it was given.

pub mod case;
pub mod in_list;
pub mod subquery;
pub mod window;

pub use case::format_case;
pub use in_list::format_in_list;
pub use subquery::format_subquery;
pub use window::format_window;

/// `<prefix> <keyword> (`, dropping the prefix when there is none.
pub(crate) fn opening_line(prefix: &str, keyword: &str) -> String {
    let opener = if keyword.is_empty() {
        "(".to_string()
    } else {
        format!("{keyword} (")
    };
    if prefix.is_empty() {
        opener
    } else {
        format!("{prefix} {opener}")
    }
}

/// `)` followed by whatever came after the closing paren, then `suffix`.
pub(crate) fn closing_line(trailing: &str, suffix: &str) -> String {
    if trailing.is_empty() {
        format!("){suffix}")
    } else {
        format!(") {trailing}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_line() {
        assert_eq!(opening_line("a", "IN"), "a IN (");
        assert_eq!(opening_line("EXISTS", ""), "EXISTS (");
        assert_eq!(opening_line("", ""), "(");
        assert_eq!(opening_line("", "OVER"), "OVER (");
    }

    #[test]
    fn test_closing_line() {
        assert_eq!(closing_line("", " AND"), ") AND");
        assert_eq!(closing_line("AS rn", ","), ") AS rn,");
    }
}
