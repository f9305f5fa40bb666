//! Error types for td
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (empty text, unknown task id, bad args)
//! - 4: Operation failed (io error, storage write failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Ambiguous task id '{input}': matches {matches}")]
    AmbiguousId { input: String, matches: String },

    #[error("Unknown priority '{0}' (expected low, medium, or high)")]
    InvalidPriority(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Unknown schema version '{0}' in saved task data")]
    UnknownSchema(String),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Task list was not saved: {0}")]
    SaveFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::EmptyText
            | Error::TaskNotFound(_)
            | Error::AmbiguousId { .. }
            | Error::InvalidPriority(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::UnknownSchema(_)
            | Error::LockFailed(_)
            | Error::SaveFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: None,
        }
    }
}
