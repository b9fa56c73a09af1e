//! Error types for Vercel CLI invocations

use thiserror::Error;

/// Errors that can occur while driving the Vercel CLI
#[derive(Error, Debug)]
pub enum VercelError {
    /// The CLI process could not be launched at all
    #[error("Failed to launch the Vercel CLI: {0}")]
    Spawn(std::io::Error),

    /// The CLI ran but exited non-zero
    #[error("Vercel CLI exited with code {code}")]
    CommandFailed { code: i32 },

    /// IO error while streaming subprocess output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Vercel CLI operations
pub type Result<T> = std::result::Result<T, VercelError>;
