pub mod error;
pub mod runner;

pub use error::DriverError;
pub use runner::{run_file, run_prompt};
