use super::Value;
use crate::typeck::Ty;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, BufRead};

static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d*\.\d+$").unwrap());
static CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'.'$").unwrap());

/// Line source for `SCAN`.
pub trait Input {
    /// The next line without its terminator, or `None` once input is
    /// exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> Input for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let len = buf.trim_end_matches(|c| c == '\n' || c == '\r').len();
        buf.truncate(len);
        Ok(Some(buf))
    }
}

/// Drops every space from an input line, then splits it on commas.
pub fn fields(line: &str) -> Vec<String> {
    line.replace(' ', "").split(',').map(String::from).collect()
}

/// Reads one field for a variable of type `ty`. The field's own shape picks
/// the value; anything that matches no pattern is taken as text.
pub fn read_value(field: &str, ty: Ty) -> Value {
    if ty == Ty::Str {
        return Value::Str(unquote(field).to_string());
    }

    if INT.is_match(field) {
        if let Ok(n) = field.parse() {
            return Value::Int(n);
        }
    } else if FLOAT.is_match(field) {
        if let Ok(n) = field.parse() {
            return Value::Float(n);
        }
    } else if CHAR.is_match(field) {
        if let Some(c) = field.chars().nth(1) {
            return Value::Char(c);
        }
    } else if field == "\"TRUE\"" {
        return Value::Bool(true);
    } else if field == "\"FALSE\"" {
        return Value::Bool(false);
    }
    Value::Str(field.to_string())
}

fn unquote(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}
