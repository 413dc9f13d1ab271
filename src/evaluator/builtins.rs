use crate::value::{BuiltinFn, BuiltinValue, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

/*
Built-in functions are consulted by identifier lookup only after the
environment chain misses, exactly like a global scope that can never be
shadowed by assignment. The table is built once, when the evaluator is
constructed, and is read-only for the rest of its life -- functionally a
process-wide table, scoped to one evaluator instance so tests can swap the
output sink without mutating real global state.
*/
pub fn build(writer: Rc<RefCell<dyn Write>>) -> HashMap<&'static str, Value> {
    let mut table: HashMap<&'static str, Value> = HashMap::new();

    table.insert(
        "len",
        Value::Builtin(Rc::new(BuiltinValue {
            name: "len",
            func: len_builtin(),
        })),
    );

    table.insert(
        "print",
        Value::Builtin(Rc::new(BuiltinValue {
            name: "print",
            func: print_builtin(writer.clone(), false),
        })),
    );

    table.insert(
        "println",
        Value::Builtin(Rc::new(BuiltinValue {
            name: "println",
            func: print_builtin(writer, true),
        })),
    );

    table
}

fn len_builtin() -> BuiltinFn {
    Rc::new(|args: &[Value]| -> Value {
        if args.len() != 1 {
            return Value::Error(format!(
                "wrong number of arguments. got={}, want=1",
                args.len()
            ));
        }
        match &args[0] {
            Value::Str(s) => Value::Integer(s.len() as i64),
            other => Value::Error(format!(
                "argument to `len` not supported, got {}",
                other.type_name()
            )),
        }
    })
}

fn print_builtin(writer: Rc<RefCell<dyn Write>>, newline_per_arg: bool) -> BuiltinFn {
    Rc::new(move |args: &[Value]| -> Value {
        let mut out = writer.borrow_mut();
        for arg in args {
            if newline_per_arg {
                let _ = writeln!(out, "{}", arg.inspect());
            } else {
                let _ = write!(out, "{}", arg.inspect());
            }
        }
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> Rc<RefCell<Vec<u8>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn len_reports_byte_length_of_strings() {
        let f = len_builtin();
        let result = f(&[Value::Str("four".into())]);
        assert_eq!(result, Value::Integer(4));
    }

    #[test]
    fn len_rejects_non_strings() {
        let f = len_builtin();
        let result = f(&[Value::Integer(5)]);
        assert_eq!(
            result,
            Value::Error("argument to `len` not supported, got INTEGER".to_string())
        );
    }

    #[test]
    fn len_enforces_arity_one() {
        let f = len_builtin();
        let result = f(&[]);
        assert_eq!(
            result,
            Value::Error("wrong number of arguments. got=0, want=1".to_string())
        );
    }

    #[test]
    fn print_has_no_trailing_newline_println_does() {
        let sink = capture();
        let print_fn = print_builtin(sink.clone(), false);
        print_fn(&[Value::Integer(1), Value::Integer(2)]);
        assert_eq!(String::from_utf8(sink.borrow().clone()).unwrap(), "12");

        let sink = capture();
        let println_fn = print_builtin(sink.clone(), true);
        println_fn(&[Value::Integer(1), Value::Integer(2)]);
        assert_eq!(String::from_utf8(sink.borrow().clone()).unwrap(), "1\n2\n");
    }
}
