use crate::{eval::Value, lex::Span, symbol::Symbol, typeck::Ty};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw lexeme as written in the source.
    pub symbol: Symbol,
    /// Decoded value of literal and escape tokens.
    pub value: Option<Value>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, symbol: Symbol, value: Option<Value>, span: Span) -> Self {
        Self {
            kind,
            symbol,
            value,
            span,
        }
    }

    pub fn dummy() -> Self {
        Self {
            kind: TokenKind::Eof,
            symbol: Symbol::intern(""),
            value: None,
            span: Span::DUMMY,
        }
    }

    /// Diagnostic for an error token, `None` for any other token.
    pub fn error_message(&self) -> Option<String> {
        match self.kind {
            TokenKind::Error(err) => Some(self.symbol.as_str_with(|s| err.message(s))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    // Keywords
    Begin,
    End,
    Code,
    If,
    Else,
    While,
    Display,
    Scan,
    And,
    Or,
    Not,

    // Type names
    Type(Ty),

    Ident,
    Literal(LiteralKind),
    /// Standalone `[x]`.
    Escape,

    // Symbols
    Comma,
    Eq,
    Colon,
    Dollar,
    Ampersand,
    OpenParen,
    CloseParen,

    // Arithmetic
    Star,
    Slash,
    Percent,
    Plus,
    Minus,

    // Comparison
    Gt,
    Lt,
    Ge,
    Le,
    EqEq,
    Ne,

    Newline,
    Error(LexError),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let s = match self {
            Begin => "BEGIN",
            End => "END",
            Code => "CODE",
            If => "IF",
            Else => "ELSE",
            While => "WHILE",
            Display => "DISPLAY",
            Scan => "SCAN",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Type(ty) => return write!(f, "{}", ty),
            Ident => "IDENTIFIER",
            Literal(kind) => return write!(f, "{} literal", kind),
            Escape => "ESCAPE",
            Comma => "','",
            Eq => "'='",
            Colon => "':'",
            Dollar => "'$'",
            Ampersand => "'&'",
            OpenParen => "'('",
            CloseParen => "')'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Plus => "'+'",
            Minus => "'-'",
            Gt => "'>'",
            Lt => "'<'",
            Ge => "'>='",
            Le => "'<='",
            EqEq => "'=='",
            Ne => "'<>'",
            Newline => "NEWLINE",
            Error(_) => "ERROR",
            Eof => "END OF INPUT",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind {
    Int,
    Float,
    Char,
    Bool,
    Str,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Int => f.write_str("INT"),
            LiteralKind::Float => f.write_str("FLOAT"),
            LiteralKind::Char => f.write_str("CHAR"),
            LiteralKind::Bool => f.write_str("BOOL"),
            LiteralKind::Str => f.write_str("STRING"),
        }
    }
}

/// Why the lexer produced an error token. The lexer never fails on its own;
/// the parser decides what to do with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    WrongCaseKeyword,
    WrongCaseType,
    InvalidNumber,
    IntOutOfRange,
    InvalidChar,
    UnterminatedString,
    InvalidEscape,
    UnknownSymbol,
}

impl LexError {
    pub fn is_wrong_case(self) -> bool {
        matches!(self, LexError::WrongCaseKeyword | LexError::WrongCaseType)
    }

    pub fn message(self, lexeme: &str) -> String {
        match self {
            LexError::WrongCaseKeyword => format!(
                "Invalid keyword '{}' should be {}",
                lexeme,
                lexeme.to_uppercase()
            ),
            LexError::WrongCaseType => format!(
                "Invalid data type '{}' should be {}",
                lexeme,
                lexeme.to_uppercase()
            ),
            LexError::InvalidNumber => format!("Invalid number '{}'", lexeme),
            LexError::IntOutOfRange => format!("Integer literal '{}' is out of range", lexeme),
            LexError::InvalidChar => format!("Invalid CHAR literal {}", lexeme),
            LexError::UnterminatedString => "Unterminated STRING literal".to_string(),
            LexError::InvalidEscape => format!("Invalid '{}' as escape sequence", lexeme),
            LexError::UnknownSymbol => format!("Unknown symbol '{}'", lexeme),
        }
    }
}
