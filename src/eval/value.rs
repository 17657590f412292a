use crate::{parse::ast::BinOp, typeck::Ty};
use std::{cmp::Ordering, fmt};

/// A runtime value. The tag always agrees with the declared type of the
/// variable holding it once [`Value::coerce`] has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Char(char),
    Bool(bool),
    Str(String),
}

macro_rules! arith_op {
    ($a:expr, $b:expr, $int:ident, $op:tt, $msg:literal) => {
        match ($a, $b) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.$int(*b))),
            (a, b) => match (a.as_f32(), b.as_f32()) {
                (Some(a), Some(b)) => Ok(Value::Float(a $op b)),
                _ => Err(format!($msg, a.ty(), b.ty())),
            },
        }
    };
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::Int(_) => Ty::Int,
            Value::Float(_) => Ty::Float,
            Value::Char(_) => Ty::Char,
            Value::Bool(_) => Ty::Bool,
            Value::Str(_) => Ty::Str,
        }
    }

    /// Converts the value for storage in a slot of type `ty`. Only Int to
    /// Float widening changes the tag; any other mismatch yields `None`.
    pub fn coerce(self, ty: Ty) -> Option<Value> {
        match (self, ty) {
            (Value::Int(n), Ty::Float) => Some(Value::Float(n as f32)),
            (v, ty) if v.ty() == ty => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Int(n) => Some(n as f32),
            Value::Float(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn neg(&self) -> Result<Value, String> {
        match *self {
            Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
            Value::Float(n) => Ok(Value::Float(-n)),
            _ => Err(format!("Unable to negate {}", self.ty())),
        }
    }

    pub fn not(&self) -> Result<Value, String> {
        match *self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(format!("Unable to operate 'NOT' on {}", self.ty())),
        }
    }

    /// Applies a binary operator, promoting Int to Float when the operands
    /// are mixed. Errors carry only the message; the caller adds location.
    pub fn binary(&self, op: BinOp, rhs: &Value) -> Result<Value, String> {
        match op {
            BinOp::Add => arith_op!(self, rhs, wrapping_add, +, "Unable to add {} and {}"),
            BinOp::Sub => arith_op!(self, rhs, wrapping_sub, -, "Unable to subtract {} and {}"),
            BinOp::Mul => arith_op!(self, rhs, wrapping_mul, *, "Unable to multiply {} and {}"),
            BinOp::Div => {
                if let (Value::Int(_), Value::Int(0)) = (self, rhs) {
                    return Err("Division by zero".to_string());
                }
                arith_op!(self, rhs, wrapping_div, /, "Unable to divide {} and {}")
            }
            BinOp::Rem => {
                if let (Value::Int(_), Value::Int(0)) = (self, rhs) {
                    return Err("Division by zero".to_string());
                }
                arith_op!(self, rhs, wrapping_rem, %, "Unable to operate '%' on {} and {}")
            }
            BinOp::And | BinOp::Or => match (self.as_bool(), rhs.as_bool()) {
                (Some(a), Some(b)) if op == BinOp::And => Ok(Value::Bool(a && b)),
                (Some(a), Some(b)) => Ok(Value::Bool(a || b)),
                _ => Err(format!(
                    "Unable to operate '{}' on {} and {}",
                    op,
                    self.ty(),
                    rhs.ty()
                )),
            },
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne => {
                let ord = match self.compare(rhs) {
                    Some(ord) => ord,
                    // NaN is unordered: only `<>` holds.
                    None if self.ty().is_numeric() && rhs.ty().is_numeric() => {
                        return Ok(Value::Bool(op == BinOp::Ne));
                    }
                    None => {
                        return Err(format!(
                            "Unable to operate '{}' on {} and {}",
                            op,
                            self.ty(),
                            rhs.ty()
                        ))
                    }
                };
                let b = match op {
                    BinOp::Lt => ord == Ordering::Less,
                    BinOp::Le => ord != Ordering::Greater,
                    BinOp::Gt => ord == Ordering::Greater,
                    BinOp::Ge => ord != Ordering::Less,
                    BinOp::Eq => ord == Ordering::Equal,
                    _ => ord != Ordering::Equal,
                };
                Ok(Value::Bool(b))
            }
        }
    }

    fn compare(&self, rhs: &Value) -> Option<Ordering> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (a, b) => a.as_f32()?.partial_cmp(&b.as_f32()?),
        }
    }
}

/// Display rendering: BOOL as `TRUE`/`FALSE`, everything else raw.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
            Value::Str(s) => f.write_str(s),
        }
    }
}
