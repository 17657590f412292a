use super::token::{LexError, LiteralKind};
use crate::{
    eval::Value,
    grammar::{self, Word},
    lex::{Span, Token, TokenKind, TokenKind::*},
    symbol::Symbol,
};

/// Pull-based lexer. Every call to [`Lexer::next_token`] yields exactly one
/// token; malformed input turns into `TokenKind::Error` tokens instead of
/// failing. Once `Eof` is reached it keeps returning `Eof`.
pub struct Lexer {
    src: Vec<char>,
    start_pos: usize,
    pos: usize,
    start_col: usize,
    line: usize,
    col: usize,
    done: bool,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.chars().collect(),
            start_pos: 0,
            pos: 0,
            start_col: 1,
            line: 1,
            col: 1,
            done: false,
        }
    }

    pub fn next_token(&mut self) -> Token {
        while !self.eof() {
            self.start_pos = self.pos;
            self.start_col = self.col;
            if let Some(t) = self.scan_token() {
                log::trace!("{:?} {:?} at {}", t.kind, t.symbol, t.span);
                return t;
            }
        }

        self.start_pos = self.pos;
        self.start_col = self.col;
        Token::new(Eof, Symbol::intern(""), None, self.mk_span())
    }

    fn scan_token(&mut self) -> Option<Token> {
        let c = self.peek();
        self.advance();
        let t = match c {
            ' ' | '\t' | '\r' => return None,
            '\n' => {
                let t = self.add_token(Newline);
                self.line += 1;
                self.col = 1;
                t
            }
            '#' => {
                self.comment();
                return None;
            }
            '*' => self.add_token(Star),
            '/' => self.add_token(Slash),
            '%' => self.add_token(Percent),
            '+' => self.add_token(Plus),
            '-' => self.add_token(Minus),
            '>' => {
                if self.eat('=') {
                    self.add_token(Ge)
                } else {
                    self.add_token(Gt)
                }
            }
            '<' => {
                if self.eat('=') {
                    self.add_token(Le)
                } else if self.eat('>') {
                    self.add_token(Ne)
                } else {
                    self.add_token(Lt)
                }
            }
            '=' => {
                if self.eat('=') {
                    self.add_token(EqEq)
                } else {
                    self.add_token(Eq)
                }
            }
            '$' => self.add_token(Dollar),
            '&' => self.add_token(Ampersand),
            '(' => self.add_token(OpenParen),
            ')' => self.add_token(CloseParen),
            ',' => self.add_token(Comma),
            ':' => self.add_token(Colon),
            '[' => self.escape(),
            '\'' => self.char_lit(),
            '"' => self.quoted(),
            c if c.is_ascii_digit() || c == '.' => self.number(),
            c if is_ident_start(c) => self.word(),
            _ => self.add_token(Error(LexError::UnknownSymbol)),
        };
        Some(t)
    }

    fn add_token(&mut self, kind: TokenKind) -> Token {
        Token::new(kind, self.mk_symbol(), None, self.mk_span())
    }

    fn add_literal(&mut self, kind: LiteralKind, value: Value) -> Token {
        Token::new(Literal(kind), self.mk_symbol(), Some(value), self.mk_span())
    }

    fn mk_span(&self) -> Span {
        Span::new(self.line, self.start_col, self.pos - self.start_pos)
    }

    fn mk_symbol(&self) -> Symbol {
        Symbol::intern(&self.lexeme())
    }

    fn lexeme(&self) -> String {
        self.src[self.start_pos..self.pos].iter().collect()
    }

    /// `[x]` outside of quotes. The bracket is already consumed.
    fn escape(&mut self) -> Token {
        let c = self.peek();
        if grammar::is_escapable(c) && self.peek_at(1) == ']' {
            self.advance();
            self.advance();
            let symbol = self.mk_symbol();
            return Token::new(Escape, symbol, Some(Value::Char(c)), self.mk_span());
        }

        while !self.eof() && !self.peek().is_whitespace() {
            self.advance();
        }
        self.add_token(Error(LexError::InvalidEscape))
    }

    /// `'x'` or `'[x]'`. The opening quote is already consumed.
    fn char_lit(&mut self) -> Token {
        let c = self.peek();
        if c == '['
            && grammar::is_escapable(self.peek_at(1))
            && self.peek_at(2) == ']'
            && self.peek_at(3) == '\''
        {
            let escaped = self.peek_at(1);
            for _ in 0..4 {
                self.advance();
            }
            return self.add_literal(LiteralKind::Char, Value::Char(escaped));
        }

        if !self.eof() && c != '\n' && !grammar::is_escapable(c) && self.peek_at(1) == '\'' {
            self.advance();
            self.advance();
            return self.add_literal(LiteralKind::Char, Value::Char(c));
        }

        while !self.eof() && self.peek() != '\'' && !self.peek().is_whitespace() {
            self.advance();
        }
        self.eat('\'');
        self.add_token(Error(LexError::InvalidChar))
    }

    /// Double-quoted text: a BOOL literal for exactly `"TRUE"`/`"FALSE"`,
    /// a STRING literal otherwise. Quotes cannot span lines.
    fn quoted(&mut self) -> Token {
        let mut text = String::new();
        while !self.eof() && self.peek() != '"' && self.peek() != '\n' {
            let c = self.peek();
            if c == '[' && grammar::is_escapable(self.peek_at(1)) && self.peek_at(2) == ']' {
                text.push(self.peek_at(1));
                self.advance();
                self.advance();
            } else {
                text.push(c);
            }
            self.advance();
        }

        if !self.eat('"') {
            return self.add_token(Error(LexError::UnterminatedString));
        }

        match self.lexeme().as_str() {
            "\"TRUE\"" => self.add_literal(LiteralKind::Bool, Value::Bool(true)),
            "\"FALSE\"" => self.add_literal(LiteralKind::Bool, Value::Bool(false)),
            _ => self.add_literal(LiteralKind::Str, Value::Str(text)),
        }
    }

    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            self.advance();
        }

        let text = self.lexeme();
        let dots = text.matches('.').count();
        if dots == 0 {
            match text.parse::<i32>() {
                Ok(n) => self.add_literal(LiteralKind::Int, Value::Int(n)),
                Err(_) => self.add_token(Error(LexError::IntOutOfRange)),
            }
        } else if dots == 1 && text.ends_with(|c: char| c.is_ascii_digit()) {
            match text.parse::<f32>() {
                Ok(n) => self.add_literal(LiteralKind::Float, Value::Float(n)),
                Err(_) => self.add_token(Error(LexError::InvalidNumber)),
            }
        } else {
            self.add_token(Error(LexError::InvalidNumber))
        }
    }

    fn word(&mut self) -> Token {
        while is_ident_continue(self.peek()) {
            self.advance();
        }

        let kind = match grammar::classify_word(&self.lexeme()) {
            Word::Reserved(kind) => kind,
            Word::WrongCase(err) => Error(err),
            Word::Ident => Ident,
        };
        self.add_token(kind)
    }

    fn comment(&mut self) {
        while self.peek() != '\n' && !self.eof() {
            self.advance();
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if !self.eof() && self.peek() == c {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, dist: usize) -> char {
        self.src.get(self.pos + dist).copied().unwrap_or_default()
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.col += 1;
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields the `Eof` token once, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let t = self.next_token();
        if t.kind == Eof {
            self.done = true;
        }
        Some(t)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
