//! GitHub Reporter - result reporting for the preview action
//!
//! Takes the structured deployment result and reflects it back to
//! GitHub: an upserted comment on the commit or pull request, and a
//! deployment record with pending/success/failure statuses. Also
//! answers the two questions the orchestrator has for the platform:
//! whether a collaborator opted a fork in, and what a commit's message
//! is.
//!
//! Reporting is best-effort throughout: the deployment is the primary
//! objective, so API failures are logged and absorbed, never fatal.

pub mod api;
pub mod client;
pub mod error;
pub mod fakes;
pub mod reporter;

// Re-export key types
pub use api::{DeploymentState, IssueComment};
pub use client::{GithubClient, GithubConfig};
pub use error::{GithubError, Result};
pub use reporter::{find_marked, opt_in_logins, CommentTarget, GithubReporter, Platform};
