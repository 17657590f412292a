//! Fixed lookup tables of the language: reserved words, binary operator
//! precedence and the characters that need the bracketed escape form.
//! Everything here is a pure function of its argument.

use crate::{
    lex::{LexError, TokenKind},
    parse::ast::BinOp,
    typeck::Ty,
};

/// How a word read by the lexer is classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Word {
    Reserved(TokenKind),
    /// A reserved word spelled with the wrong case, e.g. `begin`.
    WrongCase(LexError),
    Ident,
}

pub fn keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match word {
        "BEGIN" => Begin,
        "END" => End,
        "CODE" => Code,
        "IF" => If,
        "ELSE" => Else,
        "WHILE" => While,
        "DISPLAY" => Display,
        "SCAN" => Scan,
        "AND" => And,
        "OR" => Or,
        "NOT" => Not,
        _ => return None,
    };
    Some(kind)
}

pub fn type_name(word: &str) -> Option<Ty> {
    let ty = match word {
        "INT" => Ty::Int,
        "FLOAT" => Ty::Float,
        "CHAR" => Ty::Char,
        "BOOL" => Ty::Bool,
        "STRING" => Ty::Str,
        _ => return None,
    };
    Some(ty)
}

/// Reserved words match case-sensitively; a word that only matches once
/// upper-cased is reported rather than silently treated as an identifier.
pub fn classify_word(word: &str) -> Word {
    if let Some(kind) = keyword(word) {
        return Word::Reserved(kind);
    }
    if let Some(ty) = type_name(word) {
        return Word::Reserved(TokenKind::Type(ty));
    }

    let upper = word.to_uppercase();
    if keyword(&upper).is_some() {
        Word::WrongCase(LexError::WrongCaseKeyword)
    } else if type_name(&upper).is_some() {
        Word::WrongCase(LexError::WrongCaseType)
    } else {
        Word::Ident
    }
}

/// Binary precedence of a token; 0 means the token is not a binary operator.
pub fn binary_precedence(kind: TokenKind) -> u8 {
    use TokenKind::*;
    match kind {
        Or => 1,
        And => 2,
        Lt | Le | Gt | Ge | EqEq | Ne => 4,
        Plus | Minus => 5,
        Percent => 6,
        Star | Slash => 7,
        _ => 0,
    }
}

pub fn binary_op(kind: TokenKind) -> Option<BinOp> {
    use TokenKind::*;
    let op = match kind {
        Plus => BinOp::Add,
        Minus => BinOp::Sub,
        Star => BinOp::Mul,
        Slash => BinOp::Div,
        Percent => BinOp::Rem,
        Lt => BinOp::Lt,
        Le => BinOp::Le,
        Gt => BinOp::Gt,
        Ge => BinOp::Ge,
        EqEq => BinOp::Eq,
        Ne => BinOp::Ne,
        And => BinOp::And,
        Or => BinOp::Or,
        _ => return None,
    };
    Some(op)
}

/// Characters that must be written as `[x]` to appear literally.
pub fn is_escapable(c: char) -> bool {
    matches!(c, '[' | ']' | '&' | '$' | '#' | '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words() {
        assert_eq!(classify_word("BEGIN"), Word::Reserved(TokenKind::Begin));
        assert_eq!(
            classify_word("FLOAT"),
            Word::Reserved(TokenKind::Type(Ty::Float))
        );
        assert_eq!(
            classify_word("begin"),
            Word::WrongCase(LexError::WrongCaseKeyword)
        );
        assert_eq!(classify_word("Int"), Word::WrongCase(LexError::WrongCaseType));
        assert_eq!(classify_word("counter"), Word::Ident);
        assert_eq!(classify_word("_BEGIN"), Word::Ident);
    }

    #[test]
    fn precedence_table() {
        assert!(binary_precedence(TokenKind::Or) < binary_precedence(TokenKind::And));
        assert!(binary_precedence(TokenKind::And) < binary_precedence(TokenKind::Ne));
        assert!(binary_precedence(TokenKind::Ge) < binary_precedence(TokenKind::Minus));
        assert!(binary_precedence(TokenKind::Plus) < binary_precedence(TokenKind::Percent));
        assert!(binary_precedence(TokenKind::Percent) < binary_precedence(TokenKind::Slash));
        assert_eq!(binary_precedence(TokenKind::Not), 0);
        assert_eq!(binary_precedence(TokenKind::Eq), 0);
        assert_eq!(binary_op(TokenKind::Eq), None);
    }
}
