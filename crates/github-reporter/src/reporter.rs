//! Result reporting against the platform.
//!
//! The orchestrator only ever talks to the [`Platform`] trait; the
//! GitHub implementation lives here and an in-memory fake backs the
//! tests. Every method absorbs API failures: reporting is best-effort,
//! the deployment itself is the primary objective.

use crate::api::{DeploymentState, IssueComment};
use crate::client::GithubClient;
use crate::error::Result;
use async_trait::async_trait;
use preview_core::{CommentContext, COMMENT_MARKER, OPT_IN_COMMAND};
use tracing::{info, warn};

/// Where the preview comment goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    /// Commit comment, used for direct pushes.
    Commit { sha: String },

    /// Issue comment on the pull request.
    PullRequest { number: u64 },
}

/// Platform collaborator consumed by the orchestrator.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Whether a collaborator has opted this pull request into
    /// deployment with the opt-in command.
    async fn has_collaborator_opt_in(&self, pr_number: u64) -> bool;

    /// Message of a commit, when retrievable.
    async fn commit_message(&self, sha: &str) -> Option<String>;

    /// Create the deployment record and mark it pending. Returns the
    /// record id, or `None` when creation failed.
    async fn deployment_started(&self, git_ref: &str, log_url: Option<&str>) -> Option<u64>;

    /// Final status update for a deployment record.
    async fn deployment_finished(
        &self,
        deployment_id: u64,
        state: DeploymentState,
        environment_url: Option<&str>,
        log_url: Option<&str>,
    );

    /// Upsert the preview comment for the commit or pull request.
    async fn upsert_comment(&self, target: &CommentTarget, context: &CommentContext);
}

/// First comment carrying the action's stable marker, if any.
pub fn find_marked(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .find(|c| c.body.as_deref().is_some_and(|b| b.contains(COMMENT_MARKER)))
}

/// Logins of every author who posted the opt-in command.
pub fn opt_in_logins(comments: &[IssueComment]) -> Vec<&str> {
    comments
        .iter()
        .filter(|c| c.body.as_deref().is_some_and(|b| b.contains(OPT_IN_COMMAND)))
        .filter_map(|c| c.user.as_ref().map(|u| u.login.as_str()))
        .collect()
}

/// GitHub-backed [`Platform`] implementation.
pub struct GithubReporter {
    client: GithubClient,
}

impl GithubReporter {
    /// Create a reporter over a client.
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }

    async fn try_upsert(&self, target: &CommentTarget, body: &str) -> Result<()> {
        match target {
            CommentTarget::PullRequest { number } => {
                // A failed listing counts as "no previous comment".
                let existing = match self.client.list_issue_comments(*number).await {
                    Ok(comments) => comments,
                    Err(e) => {
                        warn!("Listing pull request comments failed, assuming none: {e}");
                        Vec::new()
                    }
                };
                match find_marked(&existing) {
                    Some(comment) => {
                        self.client.update_issue_comment(comment.id, body).await?;
                    }
                    None => {
                        self.client.create_issue_comment(*number, body).await?;
                    }
                }
            }
            CommentTarget::Commit { sha } => {
                let existing = match self.client.list_commit_comments(sha).await {
                    Ok(comments) => comments,
                    Err(e) => {
                        warn!("Listing commit comments failed, assuming none: {e}");
                        Vec::new()
                    }
                };
                match find_marked(&existing) {
                    Some(comment) => {
                        self.client.update_commit_comment(comment.id, body).await?;
                    }
                    None => {
                        self.client.create_commit_comment(sha, body).await?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for GithubReporter {
    async fn has_collaborator_opt_in(&self, pr_number: u64) -> bool {
        let comments = match self.client.list_issue_comments(pr_number).await {
            Ok(comments) => comments,
            Err(e) => {
                warn!("Listing pull request comments failed: {e}");
                return false;
            }
        };

        for login in opt_in_logins(&comments) {
            match self.client.collaborator_permission(login).await {
                Ok(permission) if permission == "admin" || permission == "write" => {
                    info!("Collaborator {login} opted this pull request in");
                    return true;
                }
                Ok(permission) => {
                    info!("Ignoring opt-in from {login} with {permission} permission");
                }
                Err(e) => {
                    warn!("Permission lookup for {login} failed: {e}");
                }
            }
        }
        false
    }

    async fn commit_message(&self, sha: &str) -> Option<String> {
        match self.client.commit_message(sha).await {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("Commit message lookup for {sha} failed: {e}");
                None
            }
        }
    }

    async fn deployment_started(&self, git_ref: &str, log_url: Option<&str>) -> Option<u64> {
        let deployment = match self.client.create_deployment(git_ref).await {
            Ok(deployment) => deployment,
            Err(e) => {
                warn!("Creating deployment record failed: {e}");
                return None;
            }
        };

        if let Err(e) = self
            .client
            .create_deployment_status(deployment.id, DeploymentState::Pending, None, log_url)
            .await
        {
            warn!("Marking deployment {} pending failed: {e}", deployment.id);
        }
        Some(deployment.id)
    }

    async fn deployment_finished(
        &self,
        deployment_id: u64,
        state: DeploymentState,
        environment_url: Option<&str>,
        log_url: Option<&str>,
    ) {
        if let Err(e) = self
            .client
            .create_deployment_status(deployment_id, state, environment_url, log_url)
            .await
        {
            warn!("Marking deployment {deployment_id} {} failed: {e}", state.as_str());
        }
    }

    async fn upsert_comment(&self, target: &CommentTarget, context: &CommentContext) {
        let body = context.render();
        match self.try_upsert(target, &body).await {
            Ok(()) => info!("Preview comment upserted"),
            Err(e) => warn!("Comment upsert failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CommentAuthor;

    fn comment(id: u64, body: &str, login: Option<&str>) -> IssueComment {
        IssueComment {
            id,
            body: Some(body.to_string()),
            user: login.map(|l| CommentAuthor {
                login: l.to_string(),
            }),
        }
    }

    #[test]
    fn test_find_marked_matches_marker() {
        let comments = vec![
            comment(1, "unrelated", Some("someone")),
            comment(2, &format!("{COMMENT_MARKER}\nold body"), Some("bot")),
            comment(3, &format!("{COMMENT_MARKER}\nnewer body"), Some("bot")),
        ];
        assert_eq!(find_marked(&comments).map(|c| c.id), Some(2));
    }

    #[test]
    fn test_find_marked_ignores_unmarked() {
        let comments = vec![comment(1, "nothing to see", Some("someone"))];
        assert!(find_marked(&comments).is_none());
    }

    #[test]
    fn test_find_marked_tolerates_empty_body() {
        let comments = vec![IssueComment {
            id: 1,
            body: None,
            user: None,
        }];
        assert!(find_marked(&comments).is_none());
    }

    #[test]
    fn test_opt_in_logins_collects_commenters() {
        let comments = vec![
            comment(1, "lgtm", Some("reviewer")),
            comment(2, &format!("{OPT_IN_COMMAND} please"), Some("maintainer")),
            comment(3, OPT_IN_COMMAND, None),
            comment(4, OPT_IN_COMMAND, Some("drive-by")),
        ];
        assert_eq!(opt_in_logins(&comments), vec!["maintainer", "drive-by"]);
    }
}
