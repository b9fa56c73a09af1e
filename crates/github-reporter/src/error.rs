//! Error types for GitHub API reporting

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API
#[derive(Error, Debug)]
pub enum GithubError {
    /// Transport-level HTTP error
    #[error("GitHub API error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("GitHub API returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        GithubError::Http(err.to_string())
    }
}

/// Result type for GitHub API operations
pub type Result<T> = std::result::Result<T, GithubError>;
