use crate::environment::Environment;
use crate::parser::Stmt;
use std::fmt;
use std::rc::Rc;

// A user-defined, closure-capturing function value.
pub struct FunctionValue {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    // The environment active at the point the function literal was
    // evaluated. Captured by `Rc` so the closure can outlive the call
    // frame that created it and keep observing later mutations made to
    // that scope by other code.
    pub env: Rc<Environment>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

pub type BuiltinFn = Rc<dyn Fn(&[Value]) -> Value>;

// A native (host-implemented) callable, e.g. `len`, `print`, `println`.
pub struct BuiltinValue {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

// The runtime value model. `Return`/`Error` are internal control values:
// a `Return` must never escape the call frame or program top level that
// unwraps it, and an `Error` short-circuits every evaluator path that
// checks for it.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Null,
    // Internal wrapper for an in-flight `return`; unwrapped at the next
    // enclosing function call or at the program boundary.
    Return(Box<Value>),
    // A runtime error, modeled as an ordinary value rather than raised.
    Error(String),
    Function(Rc<FunctionValue>),
    Builtin(Rc<BuiltinValue>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Return(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Value::Return(_))
    }

    // `Null`, `Boolean(false)`, and integer `0` are falsy. Everything else
    // -- including non-empty strings, other integers, and function values
    // -- is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false) | Value::Integer(0))
    }

    // The stable, user-facing string form used by `print`/`println`, the
    // REPL, and error messages.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Null => "null".to_string(),
            Value::Return(inner) => inner.inspect(),
            Value::Error(msg) => format!("ERROR: {}", msg),
            Value::Function(func) => {
                let name = func.name.as_deref().unwrap_or("");
                format!("func {}({}) {{ ... }}", name, func.params.join(", "))
            }
            Value::Builtin(b) => format!("<builtin {}>", b.name),
        }
    }
}

impl PartialEq for Value {
    // Mixed-type `==`/`!=` in the evaluator fall back to this comparison.
    // For value-like variants (integers, booleans, strings, null) value
    // equality coincides with the reference-identity semantics the source
    // language relies on, because there is nothing that two distinct
    // `Value::Boolean(true)`s could differ in. For the two pointer-bearing
    // variants (`Function`, `Builtin`) identity is reproduced explicitly
    // with `Rc::ptr_eq`, matching "same callable" rather than structural
    // equality of captured environments.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Return(a), Value::Return(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_table() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Integer(1).is_truthy());
        assert!(Value::Integer(-1).is_truthy());
        assert!(Value::Str("".into()).is_truthy());
    }

    #[test]
    fn inspect_forms_are_stable() {
        assert_eq!(Value::Integer(42).inspect(), "42");
        assert_eq!(Value::Boolean(true).inspect(), "true");
        assert_eq!(Value::Null.inspect(), "null");
        assert_eq!(Value::Str("hi".into()).inspect(), "hi");
        assert_eq!(Value::Error("identifier not found: y".into()).inspect(), "ERROR: identifier not found: y");
    }

    #[test]
    fn mixed_type_equality_is_false() {
        assert_ne!(Value::Integer(0), Value::Boolean(false));
        assert_ne!(Value::Null, Value::Integer(0));
    }
}
