use super::{
    ast::{BinOp, Expr, ExprKind, UnOp},
    Parser,
};
use crate::{
    err::{Error, Result},
    eval::Value,
    grammar,
    lex::{LexError, Spanned, TokenKind},
};

impl Parser {
    pub(super) fn expr(&mut self) -> Result<Expr> {
        let left = self.unary()?;
        self.binary(left, 1)
    }

    /// `( expr )` after IF / ELSE IF / WHILE.
    pub(super) fn condition(&mut self) -> Result<Expr> {
        let open = self.consume(TokenKind::OpenParen)?.span;
        let inner = self.expr()?;
        let close = self.consume(TokenKind::CloseParen)?.span;
        Ok(Expr::new(ExprKind::Paren(Box::new(inner)), open.to(close)))
    }

    /// Precedence climbing. Folds every operator of at least `min_prec` into
    /// `left`. After each right operand the parser keeps climbing while the
    /// next operator binds at least as tightly as the current one, so chains
    /// of equal precedence group to the right: `a - b - c` is `a - (b - c)`.
    fn binary(&mut self, mut left: Expr, min_prec: u8) -> Result<Expr> {
        while let Some((op, prec)) = self.peek_op() {
            if prec < min_prec {
                break;
            }
            let op = Spanned::new(op, self.curr.span);
            self.advance()?;

            let mut right = self.unary()?;
            while let Some((_, next)) = self.peek_op() {
                if next < prec {
                    break;
                }
                right = self.binary(right, next)?;
            }

            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn peek_op(&self) -> Option<(BinOp, u8)> {
        let op = grammar::binary_op(self.curr.kind)?;
        Some((op, grammar::binary_precedence(self.curr.kind)))
    }

    /// Prefix `+`, `-` and `NOT` bind tighter than any binary operator.
    fn unary(&mut self) -> Result<Expr> {
        let op = match self.curr.kind {
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Not => UnOp::Not,
            _ => return self.primary(),
        };
        let op = Spanned::new(op, self.curr.span);
        self.advance()?;

        if op.node == UnOp::Neg && self.at_int_min_magnitude() {
            let span = op.span.to(self.curr.span);
            self.advance()?;
            return Ok(Expr::new(ExprKind::Literal(Value::Int(i32::MIN)), span));
        }

        let expr = self.unary()?;
        let span = op.span.to(expr.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                expr: Box::new(expr),
            },
            span,
        ))
    }

    /// `2147483648` only fits an INT once negated, so `-2147483648` is read
    /// as a single literal.
    fn at_int_min_magnitude(&self) -> bool {
        self.curr.kind == TokenKind::Error(LexError::IntOutOfRange)
            && self
                .curr
                .symbol
                .as_str_with(|s| s.parse::<i64>() == Ok(-i64::from(i32::MIN)))
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.curr.kind {
            TokenKind::Ident => {
                let t = self.consume(TokenKind::Ident)?;
                Ok(Expr::new(ExprKind::Variable(t.symbol), t.span))
            }
            TokenKind::Literal(_) | TokenKind::Escape => {
                let t = self.consume(self.curr.kind)?;
                match t.value {
                    Some(value) => Ok(Expr::new(ExprKind::Literal(value), t.span)),
                    None => Err(Error::syntax(
                        t.span,
                        format!("Invalid literal \"{}\"", t.symbol),
                    )),
                }
            }
            TokenKind::OpenParen => {
                let open = self.consume(TokenKind::OpenParen)?.span;
                let inner = self.expr()?;
                let close = self.consume(TokenKind::CloseParen)?.span;
                Ok(Expr::new(ExprKind::Paren(Box::new(inner)), open.to(close)))
            }
            TokenKind::Error(_) => Err(self.lex_error()),
            _ => Err(self.unexpected("expression")),
        }
    }
}
