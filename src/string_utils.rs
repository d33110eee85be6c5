use memchr::memmem;
use smallvec::SmallVec;

use crate::token::{word_end, Nesting};

/// Pieces of a split clause body. Most clauses have only a handful.
pub type Pieces<'a> = SmallVec<[&'a str; 8]>;

/// Identifier characters: keywords only match on whole words.
pub(crate) fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// This is a flat substring search: quotes and parentheses are not consulted.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let upper = haystack.to_ascii_uppercase();
    memmem::find(upper.as_bytes(), needle.to_ascii_uppercase().as_bytes())
}

/// Split `haystack` at every ASCII case-insensitive occurrence of `separator`.
///
/// Like [`find_ignore_ascii_case`], this does not look at nesting.
pub fn split_ignore_ascii_case<'a>(haystack: &'a str, separator: &str) -> Pieces<'a> {
    let upper = haystack.to_ascii_uppercase();
    let needle = separator.to_ascii_uppercase();
    let mut pieces = Pieces::new();
    let mut start = 0;
    for pos in memmem::find_iter(upper.as_bytes(), needle.as_bytes()) {
        pieces.push(&haystack[start..pos]);
        start = pos + needle.len();
    }
    pieces.push(&haystack[start..]);
    pieces
}

/// Byte offsets of every whole-word occurrence of `keyword` outside quoted
/// literals. Multi-word keywords (`PARTITION BY`) match single-spaced text.
pub fn keyword_positions(text: &str, keyword: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut positions = Vec::new();
    let mut nesting = Nesting::default();
    let mut i = 0;
    while i < bytes.len() {
        if !nesting.in_quote() && is_word_byte(bytes[i]) {
            if keyword_at(text, i, keyword) {
                positions.push(i);
            }
            i = word_end(bytes, i);
            continue;
        }
        nesting = nesting.step(bytes[i]);
        i += 1;
    }
    positions
}

/// First whole-word occurrence of `keyword` outside quoted literals.
pub fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    keyword_positions(text, keyword).into_iter().next()
}

pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    find_keyword(text, keyword).is_some()
}

/// True if `text` begins with the whole word `keyword`.
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    keyword_at(text, 0, keyword)
}

fn keyword_at(text: &str, at: usize, keyword: &str) -> bool {
    let end = at + keyword.len();
    let Some(candidate) = text.get(at..end) else {
        return false;
    };
    candidate.eq_ignore_ascii_case(keyword)
        && text.as_bytes().get(end).map_or(true, |&b| !is_word_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find_ignore_ascii_case("a in (1)", " IN ("), Some(1));
        assert_eq!(find_ignore_ascii_case("a = 1", " IN ("), None);
    }

    #[test]
    fn test_split_is_flat() {
        let pieces = split_ignore_ascii_case("(a AND b) and c", " AND ");
        assert_eq!(pieces.as_slice(), ["(a", "b)", "c"]);
    }

    #[test]
    fn test_split_without_separator() {
        let pieces = split_ignore_ascii_case("x = 1", " AND ");
        assert_eq!(pieces.as_slice(), ["x = 1"]);
    }

    #[test]
    fn test_keyword_requires_whole_word() {
        assert!(!contains_keyword("overdue_days", "OVER"));
        assert!(contains_keyword("sum(x) over (order by y)", "OVER"));
        assert!(contains_keyword("x IN (SELECT id FROM u)", "SELECT"));
        assert!(!contains_keyword("selected = 1", "SELECT"));
    }

    #[test]
    fn test_keyword_skips_quoted_text() {
        assert!(!contains_keyword("x = 'SELECT'", "SELECT"));
        assert_eq!(find_keyword("'END' END", "END"), Some(6));
    }

    #[test]
    fn test_multi_word_keyword_positions() {
        let text = "PARTITION BY a ORDER BY b, c ORDER BY d";
        assert_eq!(keyword_positions(text, "ORDER BY"), vec![15, 29]);
        assert_eq!(find_keyword(text, "partition by"), Some(0));
    }

    #[test]
    fn test_starts_with_keyword() {
        assert!(starts_with_keyword("case when a then 1 end", "CASE"));
        assert!(!starts_with_keyword("case_id", "CASE"));
        assert!(!starts_with_keyword("CAS", "CASE"));
    }
}
