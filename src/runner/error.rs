use thiserror::Error;

// Driver-level failures: never visible to a running DevScript program,
// distinct from the language-level `Value::Error`.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
