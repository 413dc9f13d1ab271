pub mod ast;
pub mod parser;

pub use ast::{Expr, Program, Stmt};
pub use parser::Parser;
