mod input;
mod value;

pub use input::Input;
pub use value::Value;

use crate::{
    err::{Error, Result},
    lex::{Span, Spanned},
    parse::ast::{Block, DisplayItem, Expr, ExprKind, Program, Stmt, StmtKind, UnOp},
    symbol::{Symbol, VariableTable},
    typeck::Ty,
};
use std::io::Write;

/// Tree-walking executor. Each instance owns its variables, so a program run
/// twice through fresh interpreters behaves the same both times.
pub struct Interpreter<'io> {
    vars: VariableTable,
    input: &'io mut dyn Input,
    output: &'io mut dyn Write,
}

impl<'io> Interpreter<'io> {
    pub fn new(input: &'io mut dyn Input, output: &'io mut dyn Write) -> Self {
        Self {
            vars: VariableTable::new(),
            input,
            output,
        }
    }

    pub fn execute(&mut self, program: &Program) -> Result<()> {
        self.exec_block(&program.body)?;
        self.output
            .flush()
            .map_err(|e| Error::runtime(program.span, e.to_string()))
    }

    fn exec_block(&mut self, block: &Block) -> Result<()> {
        block.stmts.iter().try_for_each(|s| self.exec_stmt(s))
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match &stmt.kind {
            StmtKind::Declare { ty, vars } => {
                for var in vars {
                    let value = match &var.init {
                        Some(init) => {
                            let value = self.eval(init)?;
                            Some(coerce(value, *ty, var.name, init.span)?)
                        }
                        None => None,
                    };
                    if !self.vars.declare(var.name.node, *ty, value) {
                        return Err(Error::runtime(
                            var.name.span,
                            format!("\"{}\" already exists", var.name.node),
                        ));
                    }
                }
            }
            StmtKind::Assign { targets, value } => {
                let value = self.eval(value)?;
                for target in targets {
                    self.store(*target, value.clone(), stmt.span)?;
                }
            }
            StmtKind::Display(items) => self.display(items, stmt.span)?,
            StmtKind::Scan(targets) => self.scan(targets, stmt.span)?,
            StmtKind::If(branches) => {
                for branch in branches {
                    let taken = match &branch.cond {
                        Some(cond) => self.condition(cond)?,
                        None => true,
                    };
                    if taken {
                        return self.exec_block(&branch.body);
                    }
                }
            }
            StmtKind::While { cond, body } => {
                while self.condition(cond)? {
                    self.exec_block(body)?;
                }
            }
        }
        Ok(())
    }

    fn display(&mut self, items: &[DisplayItem], span: Span) -> Result<()> {
        let mut line = String::new();
        for item in items {
            match item {
                DisplayItem::Newline(_) => line.push('\n'),
                DisplayItem::Expr(e) => line.push_str(&self.eval(e)?.to_string()),
            }
        }
        log::debug!("display {:?}", line);
        self.output
            .write_all(line.as_bytes())
            .map_err(|e| Error::runtime(span, e.to_string()))
    }

    fn scan(&mut self, targets: &[Spanned<Symbol>], span: Span) -> Result<()> {
        let line = self
            .input
            .next_line()
            .map_err(|e| Error::runtime(span, e.to_string()))?
            .ok_or_else(|| Error::runtime(span, "Missing input/s"))?;
        log::debug!("scan {:?}", line);

        let fields = input::fields(&line);
        if fields.len() != targets.len() {
            return Err(Error::runtime(span, "Missing input/s"));
        }

        for (target, field) in targets.iter().zip(fields) {
            let ty = self.vars.ty(target.node).ok_or_else(|| undeclared(*target))?;
            let value = input::read_value(&field, ty);
            self.store(*target, value, target.span)?;
        }
        Ok(())
    }

    fn condition(&self, cond: &Expr) -> Result<bool> {
        self.eval(cond)?
            .as_bool()
            .ok_or_else(|| Error::runtime(cond.span, "Expression is not BOOL"))
    }

    fn store(&mut self, name: Spanned<Symbol>, value: Value, span: Span) -> Result<()> {
        let ty = self.vars.ty(name.node).ok_or_else(|| undeclared(name))?;
        let value = coerce(value, ty, name, span)?;
        self.vars.assign(name.node, value);
        Ok(())
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                l.binary(op.node, &r)
                    .map_err(|msg| Error::runtime(op.span, msg))
            }
            ExprKind::Unary { op, expr } => {
                let v = self.eval(expr)?;
                let res = match op.node {
                    UnOp::Plus if v.ty().is_numeric() => Ok(v),
                    UnOp::Plus => Err(format!("Unable to operate '+' on {}", v.ty())),
                    UnOp::Neg => v.neg(),
                    UnOp::Not => v.not(),
                };
                res.map_err(|msg| Error::runtime(op.span, msg))
            }
            ExprKind::Paren(e) => self.eval(e),
            ExprKind::Variable(name) => {
                let var = self
                    .vars
                    .get(*name)
                    .ok_or_else(|| undeclared(Spanned::new(*name, expr.span)))?;
                var.value.clone().ok_or_else(|| {
                    Error::runtime(expr.span, format!("Variable '{}' has no value", name))
                })
            }
            ExprKind::Literal(value) => Ok(value.clone()),
        }
    }
}

fn coerce(value: Value, ty: Ty, name: Spanned<Symbol>, span: Span) -> Result<Value> {
    let found = value.ty();
    value.coerce(ty).ok_or_else(|| {
        Error::runtime(span, format!("Unable to assign {} on \"{}\"", found, name.node))
    })
}

fn undeclared(name: Spanned<Symbol>) -> Error {
    Error::runtime(name.span, format!("\"{}\" does not exist", name.node))
}
