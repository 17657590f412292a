mod scan;
mod span;
mod token;

pub use scan::Lexer;
pub use span::{Span, Spanned};
pub use token::{LexError, LiteralKind, Token, TokenKind};

#[cfg(test)]
mod scan_test;
