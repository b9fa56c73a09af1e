//! GitHub REST payload types
//!
//! Only the fields this action reads are modelled; everything else in
//! the responses is ignored.

use serde::Deserialize;

/// A comment on an issue, pull request or commit.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment id, used for in-place updates.
    pub id: u64,

    /// Comment body. The upsert lookup scans it for the marker.
    pub body: Option<String>,

    /// Comment author.
    pub user: Option<CommentAuthor>,
}

/// Author of a comment.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommentAuthor {
    pub login: String,
}

/// A created deployment record.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    pub id: u64,
}

/// Commit lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub commit: CommitDetail,
}

/// Nested commit object carrying the message.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

/// Collaborator permission lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionResponse {
    pub permission: String,
}

/// Deployment status states this action reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    Pending,
    Success,
    Failure,
}

impl DeploymentState {
    /// Wire form of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentState::Pending => "pending",
            DeploymentState::Success => "success",
            DeploymentState::Failure => "failure",
        }
    }
}
