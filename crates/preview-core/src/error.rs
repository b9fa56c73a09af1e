//! Error types for the action core

use thiserror::Error;

/// Errors that can occur while assembling a run
#[derive(Error, Debug)]
pub enum ActionError {
    /// A required action input is missing or empty
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// A required GitHub environment variable is missing
    #[error("Missing GitHub context variable: {0}")]
    MissingContext(&'static str),

    /// The event payload could not be interpreted
    #[error("Malformed GitHub context: {0}")]
    MalformedContext(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ActionError>;
