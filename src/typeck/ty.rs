use std::fmt;

/// The five primitive types. A variable's type is fixed at declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Int,
    Float,
    Char,
    Bool,
    Str,
}

impl Ty {
    pub fn is_numeric(self) -> bool {
        matches!(self, Ty::Int | Ty::Float)
    }

    /// Whether a value of type `other` may be stored in a slot of type `self`.
    /// Int widens to Float; nothing narrows.
    pub fn accepts(self, other: Ty) -> bool {
        self == other || (self == Ty::Float && other == Ty::Int)
    }

    /// The common type of two binary operands, if they are compatible.
    pub fn unify(self, other: Ty) -> Option<Ty> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (Ty::Int, Ty::Float) | (Ty::Float, Ty::Int) => Some(Ty::Float),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => f.write_str("INT"),
            Ty::Float => f.write_str("FLOAT"),
            Ty::Char => f.write_str("CHAR"),
            Ty::Bool => f.write_str("BOOL"),
            Ty::Str => f.write_str("STRING"),
        }
    }
}
