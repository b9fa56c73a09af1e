//! In-memory fake for the platform trait (testing only)
//!
//! Records every reporting call so orchestrator tests can assert on
//! what would have reached GitHub, without any network.

use crate::api::DeploymentState;
use crate::reporter::{CommentTarget, Platform};
use async_trait::async_trait;
use preview_core::{CommentContext, COMMENT_MARKER};
use std::sync::Mutex;

/// Recorded deployment-status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStatus {
    pub deployment_id: u64,
    pub state: DeploymentState,
    pub environment_url: Option<String>,
}

#[derive(Debug, Default)]
struct PlatformState {
    next_deployment_id: u64,
    statuses: Vec<RecordedStatus>,
    comments: Vec<(CommentTarget, String)>,
}

/// In-memory platform backed by mutex-guarded vectors.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    opt_in: bool,
    known_commit_message: Option<String>,
    state: Mutex<PlatformState>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a collaborator posted the opt-in command.
    pub fn with_opt_in(mut self) -> Self {
        self.opt_in = true;
        self
    }

    /// Answer commit-message lookups with a fixed message.
    pub fn with_commit_message(mut self, message: &str) -> Self {
        self.known_commit_message = Some(message.to_string());
        self
    }

    /// Comments as they would appear on GitHub after all upserts.
    pub fn comments(&self) -> Vec<(CommentTarget, String)> {
        self.state.lock().unwrap().comments.clone()
    }

    /// Every status update, in order.
    pub fn statuses(&self) -> Vec<RecordedStatus> {
        self.state.lock().unwrap().statuses.clone()
    }
}

#[async_trait]
impl Platform for MemoryPlatform {
    async fn has_collaborator_opt_in(&self, _pr_number: u64) -> bool {
        self.opt_in
    }

    async fn commit_message(&self, _sha: &str) -> Option<String> {
        self.known_commit_message.clone()
    }

    async fn deployment_started(&self, _git_ref: &str, _log_url: Option<&str>) -> Option<u64> {
        let mut state = self.state.lock().unwrap();
        state.next_deployment_id += 1;
        let id = state.next_deployment_id;
        state.statuses.push(RecordedStatus {
            deployment_id: id,
            state: DeploymentState::Pending,
            environment_url: None,
        });
        Some(id)
    }

    async fn deployment_finished(
        &self,
        deployment_id: u64,
        state: DeploymentState,
        environment_url: Option<&str>,
        _log_url: Option<&str>,
    ) {
        self.state.lock().unwrap().statuses.push(RecordedStatus {
            deployment_id,
            state,
            environment_url: environment_url.map(|u| u.to_string()),
        });
    }

    async fn upsert_comment(&self, target: &CommentTarget, context: &CommentContext) {
        let body = context.render();
        let mut state = self.state.lock().unwrap();
        let existing = state
            .comments
            .iter_mut()
            .find(|(t, b)| t == target && b.contains(COMMENT_MARKER));
        match existing {
            Some(entry) => entry.1 = body,
            None => state.comments.push((target.clone(), body)),
        }
    }
}
