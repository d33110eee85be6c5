use crate::string_utils::is_word_byte;

/// Lexical nesting at a point in normalized text: open parenthesis depth and
/// whether we are inside a quoted literal.
///
/// A `Copy` value; callers thread it through their own scans rather than
/// sharing one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nesting {
    depth: usize,
    quote: Option<u8>,
    escaped: bool,
}

impl Nesting {
    pub fn depth(self) -> usize {
        self.depth
    }

    pub fn in_quote(self) -> bool {
        self.quote.is_some()
    }

    /// Depth zero and outside any quoted literal.
    pub fn is_top_level(self) -> bool {
        self.depth == 0 && self.quote.is_none()
    }

    /// Advance over one byte. Returns `None` when a `)` would close below depth zero.
    pub fn advance(self, byte: u8) -> Option<Nesting> {
        let mut next = self;
        match self.quote {
            Some(_) if self.escaped => next.escaped = false,
            Some(_) if byte == b'\\' => next.escaped = true,
            Some(q) if byte == q => next.quote = None,
            Some(_) => {}
            None => match byte {
                b'\'' | b'"' | b'`' => next.quote = Some(byte),
                b'(' => next.depth += 1,
                b')' => next.depth = self.depth.checked_sub(1)?,
                _ => {}
            },
        }
        Some(next)
    }

    /// Like [`Nesting::advance`], but a stray `)` leaves the depth at zero.
    pub fn step(self, byte: u8) -> Nesting {
        self.advance(byte).unwrap_or(self)
    }
}

/// A space-delimited word of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of the token in the scanned text.
    pub offset: usize,
    /// Nesting in effect at the token's first byte.
    pub nesting: Nesting,
}

impl Token<'_> {
    /// True if this token is `keyword` (ASCII case-insensitive) and sits
    /// outside any parenthesis or quoted literal.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.nesting.is_top_level() && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Split single-spaced text into tokens, recording the nesting before each one.
///
/// Spaces inside quoted literals split tokens too; such tokens report
/// `in_quote()` and never match a keyword.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut nesting = Nesting::default();
    let mut start = 0;
    let mut start_nesting = nesting;

    for (i, byte) in text.bytes().enumerate() {
        nesting = nesting.step(byte);
        if byte == b' ' {
            if i > start {
                tokens.push(Token {
                    text: &text[start..i],
                    offset: start,
                    nesting: start_nesting,
                });
            }
            start = i + 1;
            start_nesting = nesting;
        }
    }

    if start < text.len() {
        tokens.push(Token {
            text: &text[start..],
            offset: start,
            nesting: start_nesting,
        });
    }
    tokens
}

/// Byte index of the `)` matching the `(` at `open`, if any.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut nesting = Nesting::default();
    for (i, &byte) in bytes.iter().enumerate().skip(open) {
        nesting = nesting.advance(byte)?;
        if byte == b')' && nesting.is_top_level() {
            return Some(i);
        }
    }
    None
}

/// Byte index of the innermost unquoted `(` still open at `pos`.
pub fn enclosing_open(text: &str, pos: usize) -> Option<usize> {
    let mut nesting = Nesting::default();
    let mut open: Vec<usize> = Vec::new();
    for (i, byte) in text.bytes().enumerate().take(pos) {
        if !nesting.in_quote() {
            match byte {
                b'(' => open.push(i),
                b')' => {
                    open.pop();
                }
                _ => {}
            }
        }
        nesting = nesting.step(byte);
    }
    open.pop()
}

/// Index one past the end of the word starting at `start`.
pub(crate) fn word_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| !is_word_byte(b))
        .map_or(bytes.len(), |n| start + n)
}
