//! Run orchestration.
//!
//! An explicit linear pipeline: eligibility check, environment setup,
//! deploy, inspect, report. Each stage's output feeds the next, so the
//! stages run strictly in sequence; any fatal error marks the
//! deployment record failed (best-effort) before propagating.

use anyhow::Context;
use github_reporter::{CommentTarget, DeploymentState, Platform};
use preview_core::{
    evaluate_eligibility, write_step_outputs, ActionConfig, CommentContext, GithubContext,
};
use tracing::{info, warn};
use vercel_client::{DeploymentMeta, VercelClient, VercelSettings};

/// Outcome of one orchestrated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The event was not eligible; nothing was deployed.
    Skipped { reason: String },

    /// A deployment ran to completion.
    Deployed {
        deployment_url: String,
        inspect_url: String,
        name: Option<String>,
    },
}

/// Execute the full pipeline for one triggering event.
pub async fn run(
    config: &ActionConfig,
    context: &GithubContext,
    platform: Option<&dyn Platform>,
) -> anyhow::Result<RunOutcome> {
    // Eligibility: cross-fork pull requests need a collaborator opt-in,
    // which only the platform can answer.
    let opt_in = match (&context.pull_request, platform) {
        (Some(pr), Some(platform)) if pr.base_owner != context.owner => {
            platform.has_collaborator_opt_in(pr.number).await
        }
        _ => false,
    };
    let verdict = evaluate_eligibility(context, opt_in);
    info!("{}", verdict.reason);
    if !verdict.eligible {
        if let Some(platform) = platform {
            let explanation = CommentContext {
                commit_sha: context.effective_sha().to_string(),
                body: Some(verdict.reason.clone()),
                ..Default::default()
            };
            platform
                .upsert_comment(&comment_target(context), &explanation)
                .await;
        }
        return Ok(RunOutcome::Skipped {
            reason: verdict.reason,
        });
    }

    // Environment setup.
    let commit_message = resolve_commit_message(context, platform).await;
    let client = VercelClient::new(VercelSettings {
        token: config.vercel_token.clone(),
        org_id: config.vercel_org_id.clone(),
        project_id: config.vercel_project_id.clone(),
        scope: config.scope.clone(),
        extra_args: config.vercel_args.clone(),
        version: config.vercel_version.clone(),
        binary: config.vercel_bin.clone(),
        working_directory: config.working_directory.clone(),
    });
    let meta = DeploymentMeta {
        commit_sha: context.effective_sha().to_string(),
        actor: context.actor.clone(),
        owner: context.owner.clone(),
        repo: context.repo.clone(),
        commit_message,
        git_ref: context.effective_ref().to_string(),
    };

    let log_url = context.run_url();
    let deployment_id = match platform {
        Some(platform) => {
            platform
                .deployment_started(context.effective_ref(), log_url.as_deref())
                .await
        }
        None => None,
    };

    // Deploy.
    let deployed = match client.deploy(&meta).await {
        Ok(result) => result,
        Err(e) => {
            report_failure(platform, deployment_id, log_url.as_deref()).await;
            return Err(e).context("Vercel deployment failed");
        }
    };

    // Inspect, unless the name was configured outright.
    let name = match &config.vercel_project_name {
        Some(name) => Some(name.clone()),
        None if deployed.deployment_url.is_empty() => {
            warn!("No deployment URL to inspect; project name stays unresolved");
            None
        }
        None => match client.inspect(&deployed.deployment_url).await {
            Ok(Some(name)) => Some(name),
            Ok(None) => {
                warn!("Inspect output had no name row");
                None
            }
            Err(e) => {
                report_failure(platform, deployment_id, log_url.as_deref()).await;
                return Err(e).context("Vercel inspect failed");
            }
        },
    };

    // Report.
    if let Some(platform) = platform {
        if let Some(id) = deployment_id {
            let environment_url =
                (!deployed.deployment_url.is_empty()).then_some(deployed.deployment_url.as_str());
            platform
                .deployment_finished(id, DeploymentState::Success, environment_url, log_url.as_deref())
                .await;
        }
        if config.github_comment {
            let comment = CommentContext {
                commit_sha: meta.commit_sha.clone(),
                name: name.clone(),
                deployment_url: Some(deployed.deployment_url.clone()),
                inspect_url: Some(deployed.inspect_url.clone()),
                body: None,
            };
            platform
                .upsert_comment(&comment_target(context), &comment)
                .await;
        }
    }

    write_step_outputs(&deployed.deployment_url, name.as_deref())
        .context("Failed to publish step outputs")?;

    Ok(RunOutcome::Deployed {
        deployment_url: deployed.deployment_url,
        inspect_url: deployed.inspect_url,
        name,
    })
}

/// Commit comments for pushes, issue comments for pull requests.
fn comment_target(context: &GithubContext) -> CommentTarget {
    match &context.pull_request {
        Some(pr) => CommentTarget::PullRequest { number: pr.number },
        None => CommentTarget::Commit {
            sha: context.sha.clone(),
        },
    }
}

/// Head-commit message from the payload when present (push events),
/// otherwise a platform lookup; empty as the last resort.
async fn resolve_commit_message(
    context: &GithubContext,
    platform: Option<&dyn Platform>,
) -> String {
    if let Some(message) = &context.head_commit_message {
        return message.clone();
    }
    if let Some(platform) = platform {
        if let Some(message) = platform.commit_message(context.effective_sha()).await {
            return message;
        }
    }
    warn!("Commit message unavailable; deployment metadata will carry an empty message");
    String::new()
}

async fn report_failure(
    platform: Option<&dyn Platform>,
    deployment_id: Option<u64>,
    log_url: Option<&str>,
) {
    if let (Some(platform), Some(id)) = (platform, deployment_id) {
        platform
            .deployment_finished(id, DeploymentState::Failure, None, log_url)
            .await;
    }
}
