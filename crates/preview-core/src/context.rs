//! GitHub event context
//!
//! The Actions runner describes the triggering event through `GITHUB_*`
//! environment variables plus a JSON payload file at `GITHUB_EVENT_PATH`.
//! Both are read once into an immutable [`GithubContext`].

use crate::error::{ActionError, Result};
use serde::Deserialize;

/// Context of the pull request that triggered the run, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Pull request number.
    pub number: u64,

    /// Head commit SHA (the commit that gets deployed).
    pub head_sha: String,

    /// Head branch name, without any `refs/heads/` prefix.
    pub head_ref: String,

    /// Owner of the base repository. Differs from the current repository
    /// owner for cross-fork submissions.
    pub base_owner: String,
}

/// Immutable snapshot of the triggering GitHub event.
#[derive(Debug, Clone)]
pub struct GithubContext {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Commit SHA the workflow ran for.
    pub sha: String,

    /// Fully-qualified ref, e.g. `refs/heads/main`.
    pub git_ref: String,

    /// Login of the user that triggered the run.
    pub actor: String,

    /// Event name, e.g. `push` or `pull_request`.
    pub event_name: String,

    /// Server base URL, `https://github.com` outside GHES.
    pub server_url: String,

    /// Workflow run id, used to build the log URL.
    pub run_id: Option<String>,

    /// Pull request details for pull-request-triggered events.
    pub pull_request: Option<PullRequestContext>,

    /// Head commit message when the payload carries one (push events).
    pub head_commit_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    head_commit: Option<HeadCommitPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    head: BranchPayload,
    base: BranchPayload,
}

#[derive(Debug, Deserialize)]
struct BranchPayload {
    sha: String,
    #[serde(rename = "ref")]
    git_ref: String,
    repo: Option<RepoPayload>,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct HeadCommitPayload {
    message: Option<String>,
}

impl GithubContext {
    /// Read the context from the runner's environment.
    pub fn from_env() -> Result<Self> {
        let payload = match std::env::var("GITHUB_EVENT_PATH") {
            Ok(path) => Some(std::fs::read_to_string(path)?),
            Err(_) => None,
        };
        Self::from_lookup(|name| std::env::var(name).ok(), payload.as_deref())
    }

    /// Build the context from an arbitrary variable source and an
    /// optional raw event payload.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        payload_json: Option<&str>,
    ) -> Result<Self> {
        let required = |name: &'static str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ActionError::MissingContext(name))
        };

        let repository = required("GITHUB_REPOSITORY")?;
        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            ActionError::MalformedContext(format!(
                "GITHUB_REPOSITORY is not owner/name: {repository}"
            ))
        })?;

        let payload: Option<EventPayload> = match payload_json {
            Some(raw) => Some(serde_json::from_str(raw)?),
            None => None,
        };

        let pull_request = payload
            .as_ref()
            .and_then(|p| p.pull_request.as_ref())
            .map(|pr| PullRequestContext {
                number: pr.number,
                head_sha: pr.head.sha.clone(),
                head_ref: pr.head.git_ref.clone(),
                base_owner: pr
                    .base
                    .repo
                    .as_ref()
                    .map(|r| r.owner.login.clone())
                    .unwrap_or_default(),
            });

        let head_commit_message = payload
            .as_ref()
            .and_then(|p| p.head_commit.as_ref())
            .and_then(|c| c.message.clone());

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha: required("GITHUB_SHA")?,
            git_ref: required("GITHUB_REF")?,
            actor: lookup("GITHUB_ACTOR").unwrap_or_default(),
            event_name: required("GITHUB_EVENT_NAME")?,
            server_url: lookup("GITHUB_SERVER_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "https://github.com".to_string()),
            run_id: lookup("GITHUB_RUN_ID").filter(|v| !v.is_empty()),
            pull_request,
            head_commit_message,
        })
    }

    /// Whether the run was triggered by a pull request event.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// SHA of the commit that gets deployed: the pull request head for
    /// pull-request events, the workflow SHA otherwise.
    pub fn effective_sha(&self) -> &str {
        self.pull_request
            .as_ref()
            .map(|pr| pr.head_sha.as_str())
            .unwrap_or(&self.sha)
    }

    /// Ref of the commit that gets deployed, analogous to
    /// [`effective_sha`](Self::effective_sha).
    pub fn effective_ref(&self) -> &str {
        self.pull_request
            .as_ref()
            .map(|pr| pr.head_ref.as_str())
            .unwrap_or(&self.git_ref)
    }

    /// URL of the current workflow run, when the runner exposes one.
    pub fn run_url(&self) -> Option<String> {
        self.run_id.as_ref().map(|id| {
            format!(
                "{}/{}/{}/actions/runs/{}",
                self.server_url, self.owner, self.repo, id
            )
        })
    }
}
