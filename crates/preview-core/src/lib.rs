//! Preview Core - shared types for the Vercel preview action
//!
//! Provides the pieces every other crate leans on:
//! - Immutable run configuration read from the action's input surface
//! - The GitHub event context (repository, commit, pull request)
//! - The fork-eligibility gate
//! - Comment rendering and step-output publishing

pub mod comment;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod outputs;
pub mod telemetry;

// Re-export key types
pub use comment::{CommentContext, COMMENT_MARKER};
pub use config::ActionConfig;
pub use context::{GithubContext, PullRequestContext};
pub use error::{ActionError, Result};
pub use gate::{evaluate_eligibility, EligibilityVerdict, OPT_IN_COMMAND};
pub use outputs::write_step_outputs;
pub use telemetry::init_tracing;

/// Action version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
