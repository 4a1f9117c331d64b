//! Log conversion error types.

use thiserror::Error;

/// Errors that can occur while reading, converting, or writing equipment logs.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("source not found: {0}")]
    NotFound(String),

    #[error("invalid log format: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("write failed for {path}: {message}")]
    Write { path: String, message: String },
}

impl From<serde_json::Error> for LogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// Convenience alias for log conversion results.
pub type LogResult<T> = Result<T, LogError>;
