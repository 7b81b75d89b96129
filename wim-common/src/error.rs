//! Common error types for the adapter

use thiserror::Error;

/// Common result type for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the adapter crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested file or directory not found
    #[error("Not found: {0}")]
    NotFound(String),
}
