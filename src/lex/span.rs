use std::fmt;

/// Source location of a token or node. Lines and columns start at 1 and
/// columns count characters, not bytes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    line: usize,
    col: usize,
    len: usize,
}

impl Span {
    pub const DUMMY: Span = Span::new(0, 0, 0);

    pub const fn new(line: usize, col: usize, len: usize) -> Self {
        Self { line, col, len }
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn col(&self) -> usize {
        self.col
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    /// Covers `self` through the end of `other` when both sit on one line,
    /// otherwise keeps `self`.
    pub fn to(self, other: Span) -> Span {
        if self.line == other.line && other.col >= self.col {
            Span::new(self.line, self.col, other.col + other.len - self.col)
        } else {
            self
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.col)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}
