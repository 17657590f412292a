mod err;
mod eval;
mod grammar;
mod lex;
mod parse;
mod symbol;
mod typeck;
mod util;

pub use err::{Error, ErrorKind, Handler, Result};
pub use eval::{Input, Interpreter, Value};
pub use lex::{Span, Spanned};
pub use parse::{ast, parse};
pub use symbol::Symbol;
pub use typeck::{analyze, Ty};
pub use util::args::Args;

use std::io::Write;

/// Parses, checks and executes `src`, reading `SCAN` lines from `input` and
/// streaming `DISPLAY` text to `output`. Nothing runs unless the whole
/// program parses and type checks.
pub fn run(src: &str, input: &mut dyn Input, output: &mut dyn Write) -> Result<()> {
    let program = parse(src)?;
    analyze(&program)?;
    log::debug!("running {} statement(s)", program.body.stmts.len());
    Interpreter::new(input, output).execute(&program)
}

/// Runs `src` against in-memory input and returns everything it displayed.
pub fn run_with_input(src: &str, input: &str) -> Result<String> {
    let mut input = input.as_bytes();
    let mut output = vec![];
    run(src, &mut input, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
