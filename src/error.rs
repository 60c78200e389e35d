//! Error types for the clustering-eval library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Group shape violation: {0}")]
    Shape(String),

    #[error("Statistical test error: {0}")]
    StatisticalTest(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, EvalError>;
