use crate::{eval::Value, symbol::Symbol, typeck::Ty};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub ty: Ty,
    pub value: Option<Value>,
}

/// Flat name -> variable map. One table lives for one analysis or one
/// execution; there are no nested scopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    map: HashMap<Symbol, Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the table untouched if `name` already exists.
    pub fn declare(&mut self, name: Symbol, ty: Ty, value: Option<Value>) -> bool {
        if self.map.contains_key(&name) {
            return false;
        }
        self.map.insert(name, Variable { ty, value });
        true
    }

    /// Replaces the value of an existing variable. The declared type is kept
    /// as is; callers coerce the value beforehand.
    pub fn assign(&mut self, name: Symbol, value: Value) -> bool {
        match self.map.get_mut(&name) {
            Some(var) => {
                debug_assert_eq!(var.ty, value.ty());
                var.value = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: Symbol) -> Option<&Variable> {
        self.map.get(&name)
    }

    pub fn ty(&self, name: Symbol) -> Option<Ty> {
        self.map.get(&name).map(|var| var.ty)
    }

    pub fn is_defined(&self, name: Symbol) -> bool {
        self.map.contains_key(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_twice_keeps_first_entry() {
        let mut table = VariableTable::new();
        let a = Symbol::intern("a");
        assert!(table.declare(a, Ty::Int, Some(Value::Int(1))));
        assert!(!table.declare(a, Ty::Float, None));
        assert_eq!(table.ty(a), Some(Ty::Int));
        assert_eq!(table.get(a).unwrap().value, Some(Value::Int(1)));
    }

    #[test]
    fn assign_requires_declaration() {
        let mut table = VariableTable::new();
        let b = Symbol::intern("b");
        assert!(!table.assign(b, Value::Bool(true)));
        assert!(table.declare(b, Ty::Bool, None));
        assert_eq!(table.get(b).unwrap().value, None);
        assert!(table.assign(b, Value::Bool(true)));
        assert_eq!(table.get(b).unwrap().value, Some(Value::Bool(true)));
    }
}
