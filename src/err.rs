use crate::lex::Span;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed literal, escape or symbol that the parser could not recover.
    Lex,
    Syntax,
    Type,
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => f.write_str("lexical error"),
            ErrorKind::Syntax => f.write_str("syntax error"),
            ErrorKind::Type => f.write_str("type error"),
            ErrorKind::Runtime => f.write_str("runtime error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("({span}): {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span, msg: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            msg: msg.into(),
        }
    }

    pub fn lex(span: Span, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lex, span, msg)
    }

    pub fn syntax(span: Span, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, span, msg)
    }

    pub fn ty(span: Span, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, span, msg)
    }

    pub fn runtime(span: Span, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime, span, msg)
    }
}

/// Renders errors against the source they came from: the offending line,
/// a caret underline and the message.
pub struct Handler<'a> {
    src: &'a str,
}

impl<'a> Handler<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    pub fn render(&self, err: &Error) -> String {
        let line = match err.span.line().checked_sub(1) {
            Some(idx) => self.src.lines().nth(idx),
            None => None,
        };

        let line = match line {
            Some(l) => l.trim_end_matches('\r'),
            None => return format!("{}: {}", err.kind, err),
        };

        let col = err.span.col().max(1) - 1;
        let width = line.chars().count();
        let len = err.span.len().max(1).min(width.saturating_sub(col).max(1));
        format!(
            "{}: {}\n{}\n{}{}",
            err.kind,
            err,
            line,
            " ".repeat(col),
            "^".repeat(len),
        )
    }

    pub fn report(&self, err: &Error) {
        log::debug!("reporting {:?}", err);
        eprintln!("{}", self.render(err));
    }
}
