//! GitHub REST client
//!
//! A thin typed wrapper over the repository endpoints this action
//! touches. Best-effort semantics live one level up in the reporter;
//! the client itself surfaces every failure.

use crate::api::{CommitInfo, Deployment, DeploymentState, IssueComment, PermissionResponse};
use crate::error::{GithubError, Result};
use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use serde_json::json;

/// GitHub API configuration.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Access token used as a bearer credential.
    pub token: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// API base URL, `https://api.github.com` outside GHES.
    pub api_base: String,
}

impl GithubConfig {
    /// Create a config against the public API.
    pub fn new(token: &str, owner: &str, repo: &str) -> Self {
        GithubConfig {
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }

    /// Point the client at a different API base.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }
}

/// Client for the repository-scoped GitHub REST API.
pub struct GithubClient {
    config: GithubConfig,
    http: reqwest::Client,
}

impl GithubClient {
    /// Create a new client.
    pub fn new(config: GithubConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vercel-preview-action/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        GithubClient { config, http }
    }

    /// Comments on an issue or pull request.
    pub async fn list_issue_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        self.request_json(
            Method::GET,
            &format!("issues/{number}/comments?per_page=100"),
            None,
        )
        .await
    }

    /// Create a comment on an issue or pull request.
    pub async fn create_issue_comment(&self, number: u64, body: &str) -> Result<IssueComment> {
        self.request_json(
            Method::POST,
            &format!("issues/{number}/comments"),
            Some(json!({ "body": body })),
        )
        .await
    }

    /// Update an issue or pull request comment in place.
    pub async fn update_issue_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment> {
        self.request_json(
            Method::PATCH,
            &format!("issues/comments/{comment_id}"),
            Some(json!({ "body": body })),
        )
        .await
    }

    /// Comments on a commit.
    pub async fn list_commit_comments(&self, sha: &str) -> Result<Vec<IssueComment>> {
        self.request_json(
            Method::GET,
            &format!("commits/{sha}/comments?per_page=100"),
            None,
        )
        .await
    }

    /// Create a comment on a commit.
    pub async fn create_commit_comment(&self, sha: &str, body: &str) -> Result<IssueComment> {
        self.request_json(
            Method::POST,
            &format!("commits/{sha}/comments"),
            Some(json!({ "body": body })),
        )
        .await
    }

    /// Update a commit comment in place.
    pub async fn update_commit_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment> {
        self.request_json(
            Method::PATCH,
            &format!("comments/{comment_id}"),
            Some(json!({ "body": body })),
        )
        .await
    }

    /// Create a deployment record for a ref.
    pub async fn create_deployment(&self, git_ref: &str) -> Result<Deployment> {
        self.request_json(
            Method::POST,
            "deployments",
            Some(json!({
                "ref": git_ref,
                "environment": "Preview",
                "transient_environment": true,
                "auto_merge": false,
                "required_contexts": [],
            })),
        )
        .await
    }

    /// Attach a status to a deployment record.
    pub async fn create_deployment_status(
        &self,
        deployment_id: u64,
        state: DeploymentState,
        environment_url: Option<&str>,
        log_url: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "state": state.as_str() });
        if let Some(url) = environment_url {
            body["environment_url"] = json!(url);
        }
        if let Some(url) = log_url {
            body["log_url"] = json!(url);
        }
        self.request_unit(
            Method::POST,
            &format!("deployments/{deployment_id}/statuses"),
            Some(body),
        )
        .await
    }

    /// Permission level of a repository collaborator.
    pub async fn collaborator_permission(&self, login: &str) -> Result<String> {
        let response: PermissionResponse = self
            .request_json(
                Method::GET,
                &format!("collaborators/{login}/permission"),
                None,
            )
            .await?;
        Ok(response.permission)
    }

    /// Message of a commit.
    pub async fn commit_message(&self, sha: &str) -> Result<String> {
        let info: CommitInfo = self
            .request_json(Method::GET, &format!("commits/{sha}"), None)
            .await?;
        Ok(info.commit.message)
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.api_base, self.config.owner, self.config.repo, path
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let mut builder = self
            .http
            .request(method, self.repo_url(path))
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.send(method, path, body).await?;
        Ok(response.json::<T>().await?)
    }

    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        self.send(method, path, body).await?;
        Ok(())
    }
}
