mod ty;

pub use ty::Ty;

use crate::{
    err::{Error, Result},
    lex::{Span, Spanned},
    parse::ast::{Block, DisplayItem, Expr, ExprKind, Program, Stmt, StmtKind, UnOp},
    symbol::{Symbol, VariableTable},
};

/// Static checking pass. Owns a scratch [`VariableTable`] that records only
/// declared types; it is thrown away once the program has been validated.
#[derive(Default)]
pub struct TyEnv {
    vars: VariableTable,
}

impl TyEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&mut self, program: &Program) -> Result<()> {
        self.check_block(&program.body)
    }

    fn check_block(&mut self, block: &Block) -> Result<()> {
        block.stmts.iter().try_for_each(|s| self.check_stmt(s))
    }

    pub fn check_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        log::debug!("checking statement at {}", stmt.span);
        match &stmt.kind {
            StmtKind::Declare { ty, vars } => {
                for var in vars {
                    let name = var.name;
                    if self.vars.is_defined(name.node) {
                        return Err(Error::ty(
                            name.span,
                            format!("\"{}\" already exists", name.node),
                        ));
                    }
                    if let Some(init) = &var.init {
                        let init_ty = self.type_of(init)?;
                        ensure_assignable(*ty, init_ty, name.node, init.span)?;
                    }
                    self.vars.declare(name.node, *ty, None);
                }
            }
            StmtKind::Assign { targets, value } => {
                let value_ty = self.type_of(value)?;
                for target in targets {
                    let ty = self.lookup(*target)?;
                    ensure_assignable(ty, value_ty, target.node, value.span)?;
                }
            }
            StmtKind::Display(items) => {
                for item in items {
                    if let DisplayItem::Expr(e) = item {
                        self.type_of(e)?;
                    }
                }
            }
            StmtKind::Scan(targets) => {
                for target in targets {
                    self.lookup(*target)?;
                }
            }
            StmtKind::If(branches) => {
                for branch in branches {
                    if let Some(cond) = &branch.cond {
                        self.check_condition(cond)?;
                    }
                    self.check_block(&branch.body)?;
                }
            }
            StmtKind::While { cond, body } => {
                self.check_condition(cond)?;
                self.check_block(body)?;
            }
        }
        Ok(())
    }

    fn check_condition(&mut self, cond: &Expr) -> Result<()> {
        match self.type_of(cond)? {
            Ty::Bool => Ok(()),
            _ => Err(Error::ty(cond.span, format!("Expression is not {}", Ty::Bool))),
        }
    }

    pub fn type_of(&mut self, expr: &Expr) -> Result<Ty> {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                let l = self.type_of(left)?;
                let r = self.type_of(right)?;
                let mismatch = || {
                    Error::ty(
                        op.span,
                        format!("Unable to operate '{}' on {} and {}", op.node, l, r),
                    )
                };

                let common = l.unify(r).ok_or_else(mismatch)?;
                if op.node.is_arithmetic() && !common.is_numeric() {
                    return Err(mismatch());
                }
                if op.node.is_logical() && common != Ty::Bool {
                    return Err(mismatch());
                }
                if op.node.is_comparison() {
                    Ok(Ty::Bool)
                } else {
                    Ok(common)
                }
            }
            ExprKind::Unary { op, expr } => {
                let t = self.type_of(expr)?;
                match (op.node, t) {
                    (UnOp::Not, Ty::Bool) => Ok(t),
                    (UnOp::Plus, _) | (UnOp::Neg, _) if t.is_numeric() => Ok(t),
                    _ => Err(Error::ty(
                        op.span,
                        format!("Unable to operate '{}' on {}", op.node.to_string().trim(), t),
                    )),
                }
            }
            ExprKind::Paren(e) => self.type_of(e),
            ExprKind::Variable(name) => self.lookup(Spanned::new(*name, expr.span)),
            ExprKind::Literal(value) => Ok(value.ty()),
        }
    }

    fn lookup(&self, name: Spanned<Symbol>) -> Result<Ty> {
        self.vars.ty(name.node).ok_or_else(|| {
            Error::ty(name.span, format!("\"{}\" does not exist", name.node))
        })
    }
}

fn ensure_assignable(target: Ty, value: Ty, name: Symbol, span: Span) -> Result<()> {
    if target.accepts(value) {
        Ok(())
    } else {
        Err(Error::ty(
            span,
            format!("Unable to assign {} on \"{}\"", value, name),
        ))
    }
}

/// Validates the whole program against a fresh environment.
pub fn analyze(program: &Program) -> Result<()> {
    TyEnv::new().analyze(program)
}
