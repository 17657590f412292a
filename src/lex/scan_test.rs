use super::{LexError, Lexer, LiteralKind, Span, Token, TokenKind, TokenKind::*};
use crate::{eval::Value, typeck::Ty};
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).map(|t| t.kind).collect()
}

fn single(src: &str) -> Token {
    Lexer::new(src).next_token()
}

#[test]
fn program_skeleton() {
    assert_eq!(
        kinds("BEGIN CODE\nINT a, b = 5\nEND CODE"),
        vec![
            Begin,
            Code,
            Newline,
            Type(Ty::Int),
            Ident,
            Comma,
            Ident,
            Eq,
            Literal(LiteralKind::Int),
            Newline,
            End,
            Code,
            Eof,
        ]
    );
}

#[test]
fn operators() {
    assert_eq!(
        kinds("+ - * / % < <= > >= == <> = & $ : , ( )"),
        vec![
            Plus, Minus, Star, Slash, Percent, Lt, Le, Gt, Ge, EqEq, Ne, Eq, Ampersand, Dollar,
            Colon, Comma, OpenParen, CloseParen, Eof,
        ]
    );
}

#[test]
fn comments_are_dropped_but_newline_is_kept() {
    assert_eq!(
        kinds("a # the rest [ is ' ignored\nb"),
        vec![Ident, Newline, Ident, Eof]
    );
}

#[test]
fn positions_are_one_based() {
    let tokens: Vec<Token> = Lexer::new("BEGIN CODE\n  x = 10").collect();
    assert_eq!(tokens[0].span, Span::new(1, 1, 5));
    assert_eq!(tokens[1].span, Span::new(1, 7, 4));
    assert_eq!(tokens[2].span, Span::new(1, 11, 1));
    assert_eq!(tokens[3].span, Span::new(2, 3, 1));
    assert_eq!(tokens[5].span, Span::new(2, 7, 2));
}

#[test]
fn numbers() {
    let t = single("42");
    assert_eq!(t.kind, Literal(LiteralKind::Int));
    assert_eq!(t.value, Some(Value::Int(42)));

    let t = single("3.25");
    assert_eq!(t.kind, Literal(LiteralKind::Float));
    assert_eq!(t.value, Some(Value::Float(3.25)));

    let t = single(".5");
    assert_eq!(t.value, Some(Value::Float(0.5)));

    assert_eq!(single("1.2.3").kind, Error(LexError::InvalidNumber));
    assert_eq!(single("7.").kind, Error(LexError::InvalidNumber));
    assert_eq!(single("99999999999").kind, Error(LexError::IntOutOfRange));
}

#[test]
fn chars() {
    let t = single("'a'");
    assert_eq!(t.kind, Literal(LiteralKind::Char));
    assert_eq!(t.value, Some(Value::Char('a')));

    let t = single("'[$]'");
    assert_eq!(t.kind, Literal(LiteralKind::Char));
    assert_eq!(t.value, Some(Value::Char('$')));

    let t = single("'[']'");
    assert_eq!(t.value, Some(Value::Char('\'')));

    assert_eq!(single("'ab'").kind, Error(LexError::InvalidChar));
    assert_eq!(single("'#'").kind, Error(LexError::InvalidChar));
    assert_eq!(single("''").kind, Error(LexError::InvalidChar));
}

#[test]
fn bools_and_strings() {
    let t = single("\"TRUE\"");
    assert_eq!(t.kind, Literal(LiteralKind::Bool));
    assert_eq!(t.value, Some(Value::Bool(true)));

    let t = single("\"FALSE\"");
    assert_eq!(t.value, Some(Value::Bool(false)));

    let t = single("\"true\"");
    assert_eq!(t.kind, Literal(LiteralKind::Str));
    assert_eq!(t.value, Some(Value::Str("true".into())));

    let t = single("\"a is greater\"");
    assert_eq!(t.value, Some(Value::Str("a is greater".into())));

    let t = single("\"cost [$]5 [#]1\"");
    assert_eq!(t.value, Some(Value::Str("cost $5 #1".into())));

    let t = single("\"open\nBEGIN");
    assert_eq!(t.kind, Error(LexError::UnterminatedString));
}

#[test]
fn escapes() {
    let t = single("[#]");
    assert_eq!(t.kind, Escape);
    assert_eq!(t.value, Some(Value::Char('#')));

    let t = single("[[]");
    assert_eq!(t.value, Some(Value::Char('[')));

    let t = single("[x]");
    assert_eq!(t.kind, Error(LexError::InvalidEscape));
    assert_eq!(
        t.error_message().unwrap(),
        "Invalid '[x]' as escape sequence"
    );
}

#[test]
fn wrong_case_reserved_words() {
    let t = single("begin");
    assert_eq!(t.kind, Error(LexError::WrongCaseKeyword));
    assert_eq!(
        t.error_message().unwrap(),
        "Invalid keyword 'begin' should be BEGIN"
    );

    let t = single("Float");
    assert_eq!(t.kind, Error(LexError::WrongCaseType));
    assert_eq!(
        t.error_message().unwrap(),
        "Invalid data type 'Float' should be FLOAT"
    );
}

#[test]
fn unknown_symbol_does_not_stop_lexing() {
    assert_eq!(
        kinds("a @ b"),
        vec![Ident, Error(LexError::UnknownSymbol), Ident, Eof]
    );
}

#[test]
fn eof_is_sticky_but_iterator_is_finite() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, Ident);
    assert_eq!(lexer.next_token().kind, Eof);
    assert_eq!(lexer.next_token().kind, Eof);

    assert_eq!(Lexer::new("").count(), 1);
}
