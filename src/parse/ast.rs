use crate::{
    eval::Value,
    grammar,
    lex::{Span, Spanned},
    symbol::Symbol,
    typeck::Ty,
};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Math
    Add,
    Sub,
    Mul,
    Div,
    Rem,

    // Comparisons
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
    Eq,

    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Ne | BinOp::Eq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => f.write_str("+"),
            BinOp::Sub => f.write_str("-"),
            BinOp::Mul => f.write_str("*"),
            BinOp::Div => f.write_str("/"),
            BinOp::Rem => f.write_str("%"),
            BinOp::Lt => f.write_str("<"),
            BinOp::Gt => f.write_str(">"),
            BinOp::Le => f.write_str("<="),
            BinOp::Ge => f.write_str(">="),
            BinOp::Ne => f.write_str("<>"),
            BinOp::Eq => f.write_str("=="),
            BinOp::And => f.write_str("AND"),
            BinOp::Or => f.write_str("OR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Neg,
    Not,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Plus => f.write_str("+"),
            UnOp::Neg => f.write_str("-"),
            UnOp::Not => f.write_str("NOT "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Binary {
        op: Spanned<BinOp>,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: Spanned<UnOp>,
        expr: Box<Expr>,
    },
    Paren(Box<Expr>),
    Variable(Symbol),
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Spanned<Symbol>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    /// `$`: the text that follows starts on a new line.
    Newline(Span),
    Expr(Expr),
}

/// One `IF`/`ELSE IF`/`ELSE` arm. A bare `ELSE` has no condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub cond: Option<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Declare {
        ty: Ty,
        vars: Vec<Declarator>,
    },
    Assign {
        targets: Vec<Spanned<Symbol>>,
        value: Expr,
    },
    Display(Vec<DisplayItem>),
    Scan(Vec<Spanned<Symbol>>),
    If(Vec<Branch>),
    While {
        cond: Expr,
        body: Block,
    },
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Block,
    pub span: Span,
}

// Canonical source rendering. Parsing the rendered text yields a tree of the
// same shape.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BEGIN CODE")?;
        write_block(f, &self.body, 1)?;
        writeln!(f, "END CODE")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Binary { op, left, right } => write!(f, "{} {} {}", left, op.node, right),
            ExprKind::Unary { op, expr } => write!(f, "{}{}", op.node, expr),
            ExprKind::Paren(e) => write!(f, "({})", e),
            ExprKind::Variable(name) => write!(f, "{}", name),
            ExprKind::Literal(value) => write_literal(f, value),
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Int(n) => write!(f, "{}", n),
        // Positional digits with a fraction, so the literal lexes as FLOAT again.
        Value::Float(n) => {
            let text = n.to_string();
            if text.contains('.') {
                f.write_str(&text)
            } else {
                write!(f, "{}.0", text)
            }
        }
        Value::Char(c) if grammar::is_escapable(*c) => write!(f, "'[{}]'", c),
        Value::Char(c) => write!(f, "'{}'", c),
        Value::Bool(true) => f.write_str("\"TRUE\""),
        Value::Bool(false) => f.write_str("\"FALSE\""),
        Value::Str(s) => {
            f.write_char('"')?;
            for c in s.chars() {
                if grammar::is_escapable(c) {
                    write!(f, "[{}]", c)?;
                } else {
                    f.write_char(c)?;
                }
            }
            f.write_char('"')
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    for stmt in &block.stmts {
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn write_nested(
    f: &mut fmt::Formatter<'_>,
    kw: &str,
    block: &Block,
    depth: usize,
) -> fmt::Result {
    let indent = "    ".repeat(depth);
    writeln!(f, "{}BEGIN {}", indent, kw)?;
    write_block(f, block, depth + 1)?;
    writeln!(f, "{}END {}", indent, kw)
}

fn write_names(f: &mut fmt::Formatter<'_>, names: &[Spanned<Symbol>], sep: &str) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", name.node)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    let indent = "    ".repeat(depth);
    f.write_str(&indent)?;
    match &stmt.kind {
        StmtKind::Declare { ty, vars } => {
            write!(f, "{} ", ty)?;
            for (i, var) in vars.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", var.name.node)?;
                if let Some(init) = &var.init {
                    write!(f, " = {}", init)?;
                }
            }
            writeln!(f)
        }
        StmtKind::Assign { targets, value } => {
            write_names(f, targets, " = ")?;
            writeln!(f, " = {}", value)
        }
        StmtKind::Display(items) => {
            f.write_str("DISPLAY: ")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" & ")?;
                }
                match item {
                    DisplayItem::Newline(_) => f.write_char('$')?,
                    DisplayItem::Expr(e) => write!(f, "{}", e)?,
                }
            }
            writeln!(f)
        }
        StmtKind::Scan(targets) => {
            f.write_str("SCAN: ")?;
            write_names(f, targets, ", ")?;
            writeln!(f)
        }
        StmtKind::If(branches) => {
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    f.write_str(&indent)?;
                    f.write_str("ELSE")?;
                    if branch.cond.is_some() {
                        f.write_char(' ')?;
                    }
                }
                match &branch.cond {
                    Some(cond) => writeln!(f, "IF {}", cond)?,
                    None => writeln!(f)?,
                }
                write_nested(f, "IF", &branch.body, depth)?;
            }
            Ok(())
        }
        StmtKind::While { cond, body } => {
            writeln!(f, "WHILE {}", cond)?;
            write_nested(f, "WHILE", body, depth)
        }
    }
}
