use super::builtins;
use crate::environment::Environment;
use crate::parser::{Expr, Program, Stmt};
use crate::value::{FunctionValue, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

/*
A recursive tree-walking evaluator. `eval_*` never panics: every failure
mode becomes a `Value::Error`, which the caller must check for and
propagate before evaluating anything to its right. This gives
deterministic "first error wins" semantics in left-to-right source order.
*/
pub struct Evaluator {
    builtins: HashMap<&'static str, Value>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    // Builds an evaluator whose `print`/`println` built-ins write to
    // `writer` instead of real stdout -- used by tests that need to
    // observe built-in output without polluting the test run's own logs.
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        let writer: Rc<RefCell<dyn Write>> = Rc::new(RefCell::new(writer));
        Self {
            builtins: builtins::build(writer),
        }
    }

    pub fn eval_program(&self, program: &Program, env: &Rc<Environment>) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = self.eval_stmt(stmt, env);
            match &result {
                Value::Error(_) => return result,
                Value::Return(inner) => return (**inner).clone(),
                _ => {}
            }
        }
        result
    }

    fn eval_block(&self, statements: &[Stmt], env: &Rc<Environment>) -> Value {
        let mut result = Value::Null;
        for stmt in statements {
            result = self.eval_stmt(stmt, env);
            if result.is_error() || result.is_return() {
                return result;
            }
        }
        result
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Rc<Environment>) -> Value {
        match stmt {
            Stmt::Var { name, value, .. } => {
                let val = match value {
                    Some(expr) => self.eval_expr(expr, env),
                    None => Value::Null,
                };
                if val.is_error() {
                    return val;
                }
                env.define(name.clone(), val.clone());
                val
            }
            Stmt::Return { value, .. } => {
                let val = self.eval_expr(value, env);
                if val.is_error() {
                    val
                } else {
                    Value::Return(Box::new(val))
                }
            }
            Stmt::Expression { expr, .. } => self.eval_expr(expr, env),
        }
    }

    fn eval_expr(&self, expr: &Expr, env: &Rc<Environment>) -> Value {
        match expr {
            Expr::IntegerLiteral { value, .. } => Value::Integer(*value),
            Expr::StringLiteral { value, .. } => Value::Str(value.as_str().into()),
            Expr::BooleanLiteral { value, .. } => Value::Boolean(*value),
            Expr::Identifier { name, .. } => self.eval_identifier(name, env),
            Expr::Prefix { operator, right, .. } => {
                let right = self.eval_expr(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(operator, &right)
            }
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => {
                let left = self.eval_expr(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expr(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(operator, &left, &right)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let cond = self.eval_expr(condition, env);
                if cond.is_error() {
                    return cond;
                }
                if cond.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt, env)
                } else {
                    Value::Null
                }
            }
            Expr::FunctionLiteral { params, body, .. } => Value::Function(Rc::new(FunctionValue {
                name: None,
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            })),
            Expr::NamedFunction {
                name, params, body, ..
            } => {
                let func = Value::Function(Rc::new(FunctionValue {
                    name: Some(name.clone()),
                    params: params.clone(),
                    body: body.clone(),
                    env: env.clone(),
                }));
                env.define(name.clone(), func.clone());
                func
            }
            Expr::Call { callee, args, .. } => {
                let function = self.eval_expr(callee, env);
                if function.is_error() {
                    return function;
                }
                let mut evaluated_args = Vec::with_capacity(args.len());
                for arg in args {
                    let val = self.eval_expr(arg, env);
                    if val.is_error() {
                        return val;
                    }
                    evaluated_args.push(val);
                }
                self.apply_function(function, evaluated_args)
            }
            Expr::Assign { name, value, .. } => {
                let val = self.eval_expr(value, env);
                if val.is_error() {
                    return val;
                }
                env.assign(name.clone(), val.clone());
                val
            }
        }
    }

    fn eval_identifier(&self, name: &str, env: &Rc<Environment>) -> Value {
        if let Some(val) = env.get(name) {
            return val;
        }
        if let Some(val) = self.builtins.get(name) {
            return val.clone();
        }
        Value::Error(format!("identifier not found: {}", name))
    }

    // No arity check is performed: extra arguments are silently dropped and
    // missing ones leave their parameter unbound, which then surfaces as
    // "identifier not found" if the body reads it. Reproduces the source
    // language's documented behavior (see DESIGN.md).
    fn apply_function(&self, function: Value, args: Vec<Value>) -> Value {
        match function {
            Value::Function(func) => {
                let call_env = Environment::new_enclosed(func.env.clone());
                for (param, arg) in func.params.iter().zip(args.into_iter()) {
                    call_env.define(param.clone(), arg);
                }
                let result = self.eval_block(&func.body, &call_env);
                match result {
                    Value::Return(inner) => *inner,
                    other => other,
                }
            }
            Value::Builtin(builtin) => (builtin.func)(&args),
            other => Value::Error(format!("not a function: {}", other.type_name())),
        }
    }
}

fn eval_prefix_expression(operator: &str, right: &Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(n) => Value::Integer(-n),
            other => Value::Error(format!("unknown operator: -{}", other.type_name())),
        },
        _ => Value::Error(format!("unknown operator: {}{}", operator, right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),
        _ if operator == "==" => Value::Boolean(left == right),
        _ if operator == "!=" => Value::Boolean(left != right),
        _ if std::mem::discriminant(left) != std::mem::discriminant(right) => Value::Error(
            format!(
                "type mismatch: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            ),
        ),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => Value::Integer(left / right),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_string_infix(operator: &str, left: &Rc<str>, right: &Rc<str>) -> Value {
    match operator {
        "+" => Value::Str(format!("{}{}", left, right).into()),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn eval(input: &str) -> Value {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
        let evaluator = Evaluator::new();
        let env = Environment::new_global();
        evaluator.eval_program(&program, &env)
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval("5 + 5 * 2;"), Value::Integer(15));
    }

    #[test]
    fn assignment_writes_through() {
        assert_eq!(eval("var a = 5; a = 10; a;"), Value::Integer(10));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let input = "var add = func(x, y) { x + y; }; add(5 + 5, add(5, 5));";
        assert_eq!(eval(input), Value::Integer(20));
    }

    #[test]
    fn nested_closures_capture_outer_parameters() {
        let input = "func make(x){ func(y){ x + y; }; } var add5 = make(5); add5(7);";
        assert_eq!(eval(input), Value::Integer(12));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval(r#""Hello" + " " + "World!";"#),
            Value::Str("Hello World!".into())
        );
    }

    #[test]
    fn if_else_picks_the_truthy_branch() {
        assert_eq!(eval("if (1 < 2) { 10 } else { 20 };"), Value::Integer(10));
    }

    #[test]
    fn identifier_not_found_short_circuits() {
        let input = "var x = 5; func bad(){ y; } bad();";
        assert_eq!(
            eval(input),
            Value::Error("identifier not found: y".to_string())
        );
    }

    #[test]
    fn len_builtin_reports_byte_length() {
        assert_eq!(eval(r#"len("four");"#), Value::Integer(4));
    }

    #[test]
    fn declaration_only_var_gets_its_type_default() {
        assert_eq!(eval("var x: int; x;"), Value::Integer(0));
    }

    #[test]
    fn untyped_declaration_only_var_is_null() {
        assert_eq!(eval("var x; x;"), Value::Null);
    }

    #[test]
    fn calling_a_non_function_is_an_error_without_evaluating_further() {
        assert_eq!(
            eval("var x = 5; x(1);"),
            Value::Error("not a function: INTEGER".to_string())
        );
    }

    #[test]
    fn double_negation_round_trips() {
        assert_eq!(eval("-(-10);"), Value::Integer(10));
    }

    #[test]
    fn bang_negates_truthiness() {
        assert_eq!(eval("!!5;"), Value::Boolean(true));
        assert_eq!(eval("!5;"), Value::Boolean(false));
        assert_eq!(eval("!0;"), Value::Boolean(true));
    }

    #[test]
    fn top_level_return_unwraps_to_the_program_result() {
        assert_eq!(eval("return 5; 10;"), Value::Integer(5));
    }

    #[test]
    fn mixed_type_comparison_is_a_type_mismatch_for_non_equality_ops() {
        assert_eq!(
            eval(r#"5 + "5";"#),
            Value::Error("type mismatch: INTEGER + STRING".to_string())
        );
    }

    #[test]
    fn assign_only_writes_the_innermost_scope() {
        // the function body's `x = 99` binds a new local `x`, it does not
        // mutate the global one -- a preserved quirk of the source language.
        let input = "var x = 1; func f() { x = 99; } f(); x;";
        assert_eq!(eval(input), Value::Integer(1));
    }
}
