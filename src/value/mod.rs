pub mod value;

pub use value::{BuiltinFn, BuiltinValue, FunctionValue, Value};
