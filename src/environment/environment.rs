use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/*
A lexical scope: a mapping from identifier name to `Value`, plus an
optional outer scope. Lookup walks the chain outward; assignment writes
only into the innermost scope (see DESIGN.md -- this is a preserved quirk
of the source language, not an oversight).

Environments are always handled behind `Rc`, not owned outright, because a
closure must be able to outlive the call frame that created it while a
sibling closure created in the same scope keeps its own handle to the very
same environment. `outer` holds a strict tree (function values only ever
point outward, never back), so plain reference counting is sufficient --
no cycle collector is needed.
*/
#[derive(Debug, Default)]
pub struct Environment {
    values: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new_global() -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Binds `name` in *this* scope, shadowing any outer binding of the
    /// same name.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.values.borrow().get(name) {
            return Some(v.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Writes `name` into the innermost scope only -- it never walks up to
    /// the scope where the name may already be bound. This can shadow an
    /// outer binding by accident; it reproduces the source language's
    /// documented behavior (see DESIGN.md).
    pub fn assign(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn lookup_walks_the_outer_chain() {
        let global = Environment::new_global();
        global.define("x", Value::Integer(1));
        let local = Environment::new_enclosed(global.clone());
        assert_eq!(local.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let global = Environment::new_global();
        global.define("x", Value::Integer(1));
        let local = Environment::new_enclosed(global.clone());
        local.define("x", Value::Integer(2));
        assert_eq!(local.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn assign_writes_only_the_innermost_scope() {
        let global = Environment::new_global();
        global.define("x", Value::Integer(1));
        let local = Environment::new_enclosed(global.clone());
        // `assign` does not walk up to find where `x` is already bound --
        // it creates a new binding in `local`, shadowing the global `x`.
        local.assign("x", Value::Integer(99));
        assert_eq!(local.get("x"), Some(Value::Integer(99)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn missing_identifier_is_none() {
        let global = Environment::new_global();
        assert_eq!(global.get("missing"), None);
    }
}
