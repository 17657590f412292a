use super::{
    ast::{Expr, StmtKind},
    parse,
};

// Renders the expression assigned in a one-line program. Two spellings that
// render identically produce trees of the same shape, since the rendering
// keeps every parenthesis node and drops only spans.
fn shape(src: &str) -> String {
    let program = parse(&format!("BEGIN CODE\nx = {}\nEND CODE", src))
        .unwrap_or_else(|e| panic!("parsing failed: {}\n{}", src, e));
    match &program.body.stmts[0].kind {
        StmtKind::Assign { value, .. } => tree(value),
        other => panic!("expected assignment, got {:?}", other),
    }
}

// Fully parenthesized form that makes grouping visible.
fn tree(expr: &Expr) -> String {
    use super::ast::ExprKind::*;
    match &expr.kind {
        Binary { op, left, right } => format!("[{} {} {}]", tree(left), op.node, tree(right)),
        Unary { op, expr } => format!("[{}{}]", op.node, tree(expr)),
        Paren(inner) => format!("({})", tree(inner)),
        _ => expr.to_string(),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(shape("1 + 2 * 3"), "[1 + [2 * 3]]");
    assert_eq!(shape("1 * 2 + 3"), "[[1 * 2] + 3]");
    assert_eq!(shape("(1 + 2) * 3"), "[([1 + 2]) * 3]");
}

#[test]
fn modulo_sits_between_additive_and_multiplicative() {
    assert_eq!(shape("a + b % c"), "[a + [b % c]]");
    assert_eq!(shape("a % b * c"), "[a % [b * c]]");
}

#[test]
fn logical_operators_bind_loosest() {
    assert_eq!(shape("1 < 2 AND 3 > 2"), "[[1 < 2] AND [3 > 2]]");
    assert_eq!(shape("a OR b AND c"), "[a OR [b AND c]]");
    assert_eq!(shape("a AND b OR c"), "[[a AND b] OR c]");
    assert_eq!(shape("a AND b < c OR d"), "[[a AND [b < c]] OR d]");
}

#[test]
fn equal_precedence_keeps_climbing() {
    assert_eq!(shape("a - b - c"), "[a - [b - c]]");
    assert_eq!(shape("a / b * c"), "[a / [b * c]]");
    assert_eq!(shape("a + b * c - d"), "[a + [[b * c] - d]]");
}

#[test]
fn unary_binds_tightest() {
    assert_eq!(shape("-a * b"), "[[-a] * b]");
    assert_eq!(shape("NOT a AND b"), "[[NOT a] AND b]");
    assert_eq!(shape("- -a"), "[-[-a]]");
    assert_eq!(shape("+(a + b)"), "[+([a + b])]");
}
