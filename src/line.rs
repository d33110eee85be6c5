use std::borrow::Cow;
use std::ops::Add;
use std::sync::LazyLock;

/// Widest indentation served from the shared space buffer.
const CACHED_INDENT: usize = 200;

static SPACES: LazyLock<String> = LazyLock::new(|| " ".repeat(CACHED_INDENT));

/// Return `n` spaces, borrowed from a shared buffer for common widths.
pub fn indent_str(n: usize) -> Cow<'static, str> {
    if n <= CACHED_INDENT {
        Cow::Borrowed(&SPACES[..n])
    } else {
        Cow::Owned(" ".repeat(n))
    }
}

/// An indentation level. Formatting functions take the current level by value
/// and hand back the level in effect after they return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Indent(usize);

impl Indent {
    pub const ZERO: Indent = Indent(0);

    pub fn new(level: usize) -> Self {
        Indent(level)
    }

    pub fn level(self) -> usize {
        self.0
    }

    /// One level further in.
    pub fn deeper(self) -> Self {
        Indent(self.0 + 1)
    }
}

impl Add for Indent {
    type Output = Indent;

    fn add(self, rhs: Indent) -> Indent {
        Indent(self.0 + rhs.0)
    }
}

/// One line of formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub indent: Indent,
    pub text: String,
}

impl Line {
    pub fn new(indent: Indent, text: impl Into<String>) -> Self {
        Self {
            indent,
            text: text.into(),
        }
    }

    /// The same line pushed `by` levels further in.
    pub fn shifted(self, by: Indent) -> Self {
        Self {
            indent: self.indent + by,
            text: self.text,
        }
    }

    /// Render with `indent_width` spaces per level.
    pub fn render(&self, indent_width: usize) -> String {
        let mut rendered = String::with_capacity(self.text.len() + indent_width * self.indent.0);
        rendered.push_str(&indent_str(indent_width * self.indent.0));
        rendered.push_str(&self.text);
        rendered
    }
}
