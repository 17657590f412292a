use codelang::{ErrorKind, Handler};
use pretty_assertions::assert_eq;

use std::sync::Once;

/// Setup function that is only run once, even if called multiple times.
fn setup() {
    static INIT: Once = Once::new();
    INIT.call_once(|| env_logger::init());
}

fn run_ok(src: &str, input: &str) -> String {
    setup();
    match codelang::run_with_input(src, input) {
        Ok(out) => out,
        Err(e) => panic!("{}", Handler::new(src).render(&e)),
    }
}

fn run_err(src: &str, input: &str) -> codelang::Error {
    setup();
    codelang::run_with_input(src, input).unwrap_err()
}

#[test]
fn hello() {
    let out = run_ok(
        r#"
BEGIN CODE
    DISPLAY: "Hello, World!" & $
END CODE
"#,
        "",
    );
    assert_eq!(out, "Hello, World!\n");
}

#[test]
fn sample_program() {
    let out = run_ok(
        r#"
BEGIN CODE
    INT a = 100, b = 200, c = 300
    BOOL d = "FALSE"
    d = (a < b AND c <> 200)
    DISPLAY: d
END CODE
"#,
        "",
    );
    assert_eq!(out, "TRUE");
}

#[test]
fn precedence() {
    let src = |e: &str| format!("BEGIN CODE\nINT x = {}\nDISPLAY: x\nEND CODE", e);
    assert_eq!(run_ok(&src("1 + 2 * 3"), ""), "7");
    assert_eq!(run_ok(&src("(1 + 2) * 3"), ""), "9");
    assert_eq!(
        run_ok("BEGIN CODE\nDISPLAY: 1 < 2 AND 3 > 2\nEND CODE", ""),
        "TRUE"
    );
}

#[test]
fn widening() {
    assert_eq!(
        run_ok("BEGIN CODE\nFLOAT f = 1\nDISPLAY: f / 4\nEND CODE", ""),
        "0.25"
    );
    let e = run_err("BEGIN CODE\nINT a = 1.5\nEND CODE", "");
    assert_eq!(e.kind, ErrorKind::Type);
    assert_eq!(e.to_string(), "(2,9): Unable to assign FLOAT on \"a\"");
}

#[test]
fn bool_rendering() {
    let out = run_ok(
        "BEGIN CODE\nBOOL t = \"TRUE\"\nDISPLAY: t & $ & NOT t\nEND CODE",
        "",
    );
    assert_eq!(out, "TRUE\nFALSE");
}

#[test]
fn scan_mismatch() {
    let e = run_err("BEGIN CODE\nINT a\nSCAN: a\nEND CODE", "hello\n");
    assert_eq!(e.kind, ErrorKind::Runtime);
    assert_eq!(e.span.line(), 3);
}

#[test]
fn scan_ignores_spaces() {
    let out = run_ok("BEGIN CODE\nINT x\nSCAN: x\nDISPLAY: x\nEND CODE", "1 2\n");
    assert_eq!(out, "12");
}

#[test]
fn int_bounds() {
    let out = run_ok(
        "BEGIN CODE\nINT a = -2147483648, b = 2147483647\nDISPLAY: a & \" \" & b + 1\nEND CODE",
        "",
    );
    assert_eq!(out, "-2147483648 -2147483648");
}

#[test]
fn scan_then_compute() {
    let out = run_ok(
        r#"
BEGIN CODE
    INT x, y
    FLOAT avg
    SCAN: x, y
    avg = (x + y) / 2.0
    DISPLAY: "avg: " & avg
END CODE
"#,
        "3, 4\n",
    );
    assert_eq!(out, "avg: 3.5");
}

#[test]
fn conditional_fallthrough() {
    let out = run_ok(
        r#"
BEGIN CODE
    INT a = 5
    IF (a < 0)
    BEGIN IF
        DISPLAY: "negative"
    END IF
    ELSE IF (a == 0)
    BEGIN IF
        DISPLAY: "zero"
    END IF
    DISPLAY: "end"
END CODE
"#,
        "",
    );
    assert_eq!(out, "end");
}

#[test]
fn nested_loops() {
    let out = run_ok(
        r#"
BEGIN CODE
    INT i = 1, j
    WHILE (i <= 3)
    BEGIN WHILE
        j = 1
        WHILE (j <= i)
        BEGIN WHILE
            DISPLAY: "*"
            j = j + 1
        END WHILE
        DISPLAY: $
        i = i + 1
    END WHILE
END CODE
"#,
        "",
    );
    assert_eq!(out, "*\n**\n***\n");
}

#[test]
fn escapes() {
    let out = run_ok(
        "BEGIN CODE\nDISPLAY: [[] & \"[#]1 [&] [$]\" & []]\nEND CODE",
        "",
    );
    assert_eq!(out, "[#1 & $]");
}

#[test]
fn comments_are_ignored() {
    let out = run_ok(
        "# leading\nBEGIN CODE\n# inside\nINT a = 1 # trailing\nDISPLAY: a\nEND CODE\n",
        "",
    );
    assert_eq!(out, "1");
}

#[test]
fn analyzer_gates_execution() {
    // The DISPLAY would run first if execution were not gated on checking.
    let e = run_err(
        "BEGIN CODE\nINT a = 1\nDISPLAY: a\nIF (a)\nBEGIN IF\nEND IF\nEND CODE",
        "",
    );
    assert_eq!(e.kind, ErrorKind::Type);

    let mut input: &[u8] = b"";
    let mut out = vec![];
    codelang::run(
        "BEGIN CODE\nDISPLAY: \"x\"\nDISPLAY: y\nEND CODE",
        &mut input,
        &mut out,
    )
    .unwrap_err();
    assert!(out.is_empty());
}

#[test]
fn runs_are_independent() {
    let src = "BEGIN CODE\nINT n\nSCAN: n\nDISPLAY: n * 2\nEND CODE";
    assert_eq!(run_ok(src, "21\n"), "42");
    assert_eq!(run_ok(src, "21\n"), "42");
    assert_eq!(run_ok(src, "5\n"), "10");
}

#[test]
fn rendered_program_runs_the_same() {
    let src = r#"
BEGIN CODE
    INT a = 3, b
    CHAR c = '[#]'
    b = a * -2 + 10 % 4
    IF (b > 0 OR NOT (a == 3))
    BEGIN IF
        DISPLAY: "pos" & c
    END IF
    ELSE
    BEGIN IF
        DISPLAY: b & $ & c
    END IF
END CODE
"#;
    let rendered = codelang::parse(src).unwrap().to_string();
    assert_eq!(run_ok(&rendered, ""), run_ok(src, ""));
}

#[test]
fn errors_carry_locations() {
    let e = run_err("BEGIN CODE\nINT a\n  a = b\nEND CODE", "");
    assert_eq!(e.to_string(), "(3,7): \"b\" does not exist");

    let e = run_err("BEGIN CODE\nINT a = 1 / 0\nEND CODE", "");
    assert_eq!(e.kind, ErrorKind::Runtime);
    assert_eq!(e.to_string(), "(2,11): Division by zero");

    let e = run_err("BEGIN CODE\nINT a\n", "");
    assert_eq!(e.kind, ErrorKind::Syntax);
}
