use phf::phf_map;

/// The top-level clause kinds the formatter lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Select,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    /// Text before the first boundary keyword, emitted verbatim.
    Other,
}

/// Keywords that start a new clause when they appear at parenthesis depth 0.
///
/// `FULL JOIN`, `CROSS JOIN` and `OUTER JOIN` are absent: their tokens stay
/// in whichever clause precedes them.
pub static BOUNDARY_KEYWORDS: phf::Map<&'static str, ClauseKind> = phf_map! {
    "SELECT" => ClauseKind::Select,
    "FROM" => ClauseKind::From,
    "INNER JOIN" => ClauseKind::Join,
    "LEFT JOIN" => ClauseKind::Join,
    "RIGHT JOIN" => ClauseKind::Join,
    "WHERE" => ClauseKind::Where,
    "GROUP BY" => ClauseKind::GroupBy,
    "HAVING" => ClauseKind::Having,
    "ORDER BY" => ClauseKind::OrderBy,
};

/// Look up a one- or two-word boundary keyword, returning its canonical
/// (uppercase) spelling and kind.
pub fn boundary_keyword(words: &str) -> Option<(&'static str, ClauseKind)> {
    let upper = words.to_ascii_uppercase();
    BOUNDARY_KEYWORDS
        .get_entry(upper.as_str())
        .map(|(keyword, kind)| (*keyword, *kind))
}

/// A contiguous slice of the normalized statement starting at a boundary
/// keyword (or at the start of input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    pub kind: ClauseKind,
    /// Canonical keyword, empty for [`ClauseKind::Other`].
    pub keyword: &'static str,
    /// The whole clause as it appears in the input.
    pub text: &'a str,
    /// Everything after the keyword, trimmed.
    pub body: &'a str,
}

impl<'a> Clause<'a> {
    /// Build a clause from its text; `keyword` must be a prefix of `text`
    /// (ignoring case) or empty.
    pub fn new(kind: ClauseKind, keyword: &'static str, text: &'a str) -> Self {
        let body = text.get(keyword.len()..).unwrap_or_default().trim();
        Self {
            kind,
            keyword,
            text,
            body,
        }
    }

    pub fn other(text: &'a str) -> Self {
        Self::new(ClauseKind::Other, "", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_keyword_is_case_insensitive() {
        assert_eq!(boundary_keyword("group by"), Some(("GROUP BY", ClauseKind::GroupBy)));
        assert_eq!(boundary_keyword("Left Join"), Some(("LEFT JOIN", ClauseKind::Join)));
        assert_eq!(boundary_keyword("select"), Some(("SELECT", ClauseKind::Select)));
    }

    #[test]
    fn test_unsupported_joins_are_not_boundaries() {
        assert_eq!(boundary_keyword("FULL JOIN"), None);
        assert_eq!(boundary_keyword("CROSS JOIN"), None);
        assert_eq!(boundary_keyword("OUTER JOIN"), None);
        assert_eq!(boundary_keyword("JOIN"), None);
    }

    #[test]
    fn test_clause_body_strips_keyword() {
        let clause = Clause::new(ClauseKind::OrderBy, "ORDER BY", "order by a, b");
        assert_eq!(clause.body, "a, b");
        assert_eq!(Clause::other("WITH x AS").body, "WITH x AS");
    }
}
