use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::value::Value;
use std::rc::Rc;

// Thin orchestration over lex -> parse -> eval. Unlike a one-shot
// expression evaluator, `run` takes a caller-supplied environment so a
// REPL can thread one persistent scope across many calls.
pub struct Interpreter {
    evaluator: Evaluator,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
        }
    }

    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    // Returns `Err` with the accumulated parse errors if `source` doesn't
    // parse; otherwise evaluates the program and returns its final `Value`
    // (any top-level `return` already unwrapped).
    pub fn run(&self, source: &str, env: &Rc<Environment>) -> Result<Value, Vec<String>> {
        let mut parser = Parser::new(Lexer::new(source));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            return Err(parser.errors().to_vec());
        }
        Ok(self.evaluator.eval_program(&program, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Result<Value, Vec<String>> {
        let interpreter = Interpreter::new();
        let env = Environment::new_global();
        interpreter.run(source, &env)
    }

    #[test]
    fn runs_a_full_program_end_to_end() {
        assert_eq!(run("5 + 5 * 2;"), Ok(Value::Integer(15)));
    }

    #[test]
    fn persists_bindings_across_successive_calls_on_the_same_environment() {
        let interpreter = Interpreter::new();
        let env = Environment::new_global();
        assert_eq!(interpreter.run("var a = 5;", &env), Ok(Value::Integer(5)));
        assert_eq!(interpreter.run("a = a + 1;", &env), Ok(Value::Integer(6)));
        assert_eq!(interpreter.run("a;", &env), Ok(Value::Integer(6)));
    }

    #[test]
    fn surfaces_accumulated_parse_errors_instead_of_evaluating() {
        let result = run("var;");
        assert!(result.is_err());
    }

    #[test]
    fn a_runtime_error_is_a_value_not_an_err_result() {
        assert_eq!(
            run("y;"),
            Ok(Value::Error("identifier not found: y".to_string()))
        );
    }

    #[test]
    fn top_level_return_unwraps_to_the_final_value() {
        assert_eq!(run("return 42; 0;"), Ok(Value::Integer(42)));
    }
}
