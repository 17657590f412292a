pub mod ast;
mod expr;

use crate::{
    err::{Error, Result},
    lex::{LexError, Lexer, Spanned, Token, TokenKind, TokenKind::*},
    symbol::Symbol,
    typeck::Ty,
};
use ast::{Block, Branch, Declarator, DisplayItem, Program, Stmt, StmtKind};
use std::collections::HashSet;

/// Recursive-descent parser over a pull-based [`Lexer`]. The whole program
/// is parsed eagerly; the first error aborts and no partial tree is returned.
pub struct Parser {
    lexer: Lexer,
    curr: Token,
    prev: Token,
    /// Every name declared so far, for wrong-case recovery.
    declared: HashSet<Symbol>,
    declaring: bool,
    can_declare: bool,
}

impl Parser {
    pub fn new(src: &str) -> Self {
        let mut lexer = Lexer::new(src);
        let curr = lexer.next_token();
        Self {
            lexer,
            curr,
            prev: Token::dummy(),
            declared: HashSet::new(),
            declaring: false,
            can_declare: true,
        }
    }

    /// `BEGIN CODE` newline statements `END CODE` end-of-input.
    pub fn parse_program(&mut self) -> Result<Program> {
        self.recover()?;
        self.skip_newlines()?;

        let span = self.consume(Begin)?.span;
        self.consume(Code)?;
        self.end_of_stmt()?;

        let stmts = self.statements()?;

        self.consume(End)?;
        self.consume(Code)?;
        self.skip_newlines()?;
        self.consume(Eof)?;

        Ok(Program {
            body: Block { stmts },
            span,
        })
    }

    fn statements(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = vec![];
        loop {
            self.skip_newlines()?;
            match self.curr.kind {
                End => break,
                Eof => return Err(Error::syntax(self.curr.span, "Missing END statement")),
                _ => stmts.push(self.stmt()?),
            }
        }
        Ok(stmts)
    }

    /// `BEGIN <kw>` newline statements `END <kw>`.
    fn block(&mut self, kw: TokenKind) -> Result<Block> {
        self.skip_newlines()?;
        self.consume(Begin)?;
        self.consume(kw)?;
        self.end_of_stmt()?;
        let stmts = self.statements()?;
        self.consume(End)?;
        self.consume(kw)?;
        Ok(Block { stmts })
    }

    fn stmt(&mut self) -> Result<Stmt> {
        let kind = self.curr.kind;
        if let Type(_) = kind {
            if !self.can_declare {
                return Err(Error::syntax(
                    self.curr.span,
                    "Invalid syntax: declarations must come before executable statements",
                ));
            }
        } else {
            self.can_declare = false;
        }

        let stmt = match kind {
            Type(ty) => self.declaration(ty)?,
            Ident => self.assignment()?,
            Display => self.display()?,
            Scan => self.scan()?,
            If => return self.conditional(),
            While => self.while_loop()?,
            _ => {
                return Err(Error::syntax(
                    self.curr.span,
                    format!("Invalid syntax \"{}\"", self.curr.symbol),
                ))
            }
        };
        log::debug!("parsed statement at {}", stmt.span);
        self.end_of_stmt()?;
        Ok(stmt)
    }

    /// `TYPE name [= expr] (, name [= expr])*`
    fn declaration(&mut self, ty: Ty) -> Result<Stmt> {
        let span = self.curr.span;
        self.declaring = true;
        self.advance()?;

        let mut vars = vec![self.declarator()?];
        while self.eat(Comma)? {
            vars.push(self.declarator()?);
        }
        self.declaring = false;

        Ok(Stmt::new(StmtKind::Declare { ty, vars }, span))
    }

    fn declarator(&mut self) -> Result<Declarator> {
        let name = self.consume(Ident)?;
        self.declared.insert(name.symbol);
        let init = if self.eat(Eq)? {
            Some(self.expr()?)
        } else {
            None
        };
        Ok(Declarator {
            name: Spanned::new(name.symbol, name.span),
            init,
        })
    }

    /// `a = b = expr`: every intermediate value must be a plain identifier.
    fn assignment(&mut self) -> Result<Stmt> {
        let first = self.consume(Ident)?;
        let span = first.span;
        let mut targets = vec![Spanned::new(first.symbol, first.span)];

        self.consume(Eq)?;
        let mut value = self.expr()?;
        while self.check(Eq) {
            match value.kind {
                ast::ExprKind::Variable(name) => targets.push(Spanned::new(name, value.span)),
                _ => return Err(Error::syntax(self.curr.span, "Invalid assignment target")),
            }
            self.advance()?;
            value = self.expr()?;
        }

        Ok(Stmt::new(StmtKind::Assign { targets, value }, span))
    }

    /// `DISPLAY: item (& item)*` where an item is `$` or an expression.
    fn display(&mut self) -> Result<Stmt> {
        let span = self.consume(Display)?.span;
        self.consume(Colon)?;

        let mut items = vec![self.display_item()?];
        while self.eat(Ampersand)? {
            if matches!(self.curr.kind, Newline | Eof) {
                return Err(self.unexpected("expression"));
            }
            items.push(self.display_item()?);
        }

        Ok(Stmt::new(StmtKind::Display(items), span))
    }

    fn display_item(&mut self) -> Result<DisplayItem> {
        if self.check(Dollar) {
            let span = self.curr.span;
            self.advance()?;
            Ok(DisplayItem::Newline(span))
        } else {
            Ok(DisplayItem::Expr(self.expr()?))
        }
    }

    /// `SCAN: a (, b)*`
    fn scan(&mut self) -> Result<Stmt> {
        let span = self.consume(Scan)?.span;
        self.consume(Colon)?;

        let mut targets = vec![];
        loop {
            let name = self.consume(Ident)?;
            targets.push(Spanned::new(name.symbol, name.span));
            if !self.eat(Comma)? {
                break;
            }
        }

        Ok(Stmt::new(StmtKind::Scan(targets), span))
    }

    /// `IF (c) block (ELSE IF (c) block)* (ELSE block)?`. Consumes its own
    /// trailing newlines while looking for `ELSE`.
    fn conditional(&mut self) -> Result<Stmt> {
        let span = self.consume(If)?.span;
        let cond = self.condition()?;
        let body = self.block(If)?;
        let mut branches = vec![Branch {
            cond: Some(cond),
            body,
        }];
        self.end_of_stmt()?;
        self.skip_newlines()?;

        let mut has_else = false;
        while self.check(Else) {
            if has_else {
                return Err(Error::syntax(
                    self.curr.span,
                    "Invalid syntax ELSE: no clause may follow a bare ELSE",
                ));
            }
            self.advance()?;

            let cond = if self.eat(If)? {
                Some(self.condition()?)
            } else {
                has_else = true;
                None
            };
            let body = self.block(If)?;
            branches.push(Branch { cond, body });
            self.end_of_stmt()?;
            self.skip_newlines()?;
        }

        log::debug!("parsed IF with {} branch(es) at {}", branches.len(), span);
        Ok(Stmt::new(StmtKind::If(branches), span))
    }

    fn while_loop(&mut self) -> Result<Stmt> {
        let span = self.consume(While)?.span;
        let cond = self.condition()?;
        let body = self.block(While)?;
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    fn end_of_stmt(&mut self) -> Result<()> {
        match self.curr.kind {
            Newline => self.advance(),
            Eof => Ok(()),
            _ => Err(self.unexpected(Newline)),
        }
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.check(Newline) {
            self.advance()?;
        }
        Ok(())
    }

    fn lex_error(&self) -> Error {
        let msg = self.curr.error_message().unwrap_or_default();
        Error::lex(self.curr.span, msg)
    }

    fn unexpected(&self, expected: impl std::fmt::Display) -> Error {
        Error::syntax(
            self.curr.span,
            format!(
                "Unexpected {} token expected {} token",
                self.curr.kind, expected
            ),
        )
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            self.advance()?;
            return Ok(self.prev.clone());
        }
        Err(self.unexpected(kind))
    }

    fn eat(&mut self, kind: TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.curr.kind == kind
    }

    fn advance(&mut self) -> Result<()> {
        let next = self.lexer.next_token();
        self.prev = std::mem::replace(&mut self.curr, next);
        self.recover()
    }

    /// Inspects a freshly read token. A wrong-case reserved word becomes an
    /// identifier when it sits in a declaration's name slot or spells a name
    /// that was already declared; any other error token is fatal.
    fn recover(&mut self) -> Result<()> {
        let err = match self.curr.kind {
            TokenKind::Error(err) => err,
            _ => return Ok(()),
        };

        // `unary` decides whether this is the magnitude of the smallest INT.
        if err == LexError::IntOutOfRange && self.prev.kind == Minus {
            return Ok(());
        }

        let name_slot = self.declaring && matches!(self.prev.kind, Type(_) | Comma);
        if err.is_wrong_case() && (name_slot || self.declared.contains(&self.curr.symbol)) {
            log::debug!(
                "treating '{}' at {} as an identifier",
                self.curr.symbol,
                self.curr.span
            );
            self.curr.kind = Ident;
            self.curr.value = None;
            return Ok(());
        }

        Err(self.lex_error())
    }
}

pub fn parse(src: &str) -> Result<Program> {
    Parser::new(src).parse_program()
}


#[cfg(test)]
mod precedence_test;
