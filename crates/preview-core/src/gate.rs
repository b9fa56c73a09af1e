//! Fork eligibility gate
//!
//! Cross-fork pull requests get no deployment by default: the workflow
//! would hand the fork author a deployment made with the repository's
//! own credentials. A collaborator can opt a fork in by commenting the
//! opt-in command on the pull request.

use crate::context::GithubContext;

/// Comment command that opts a forked pull request into deployment.
/// Only counts when its author holds write or admin permission.
pub const OPT_IN_COMMAND: &str = "/vercel deploy";

/// Gate evaluation verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityVerdict {
    /// Whether the event may proceed to deployment.
    pub eligible: bool,

    /// Human-readable explanation, also used for the skip comment.
    pub reason: String,
}

/// Evaluate whether the triggering event is eligible for deployment.
///
/// Rules:
/// - Non-pull-request events are always eligible.
/// - Pull requests whose base repository owner matches the current
///   repository owner are eligible.
/// - Cross-fork pull requests are eligible only with a collaborator
///   opt-in (`collaborator_opt_in` is resolved by the caller, since the
///   lookup needs the platform API).
pub fn evaluate_eligibility(
    context: &GithubContext,
    collaborator_opt_in: bool,
) -> EligibilityVerdict {
    let Some(pr) = &context.pull_request else {
        return EligibilityVerdict {
            eligible: true,
            reason: format!("{} event is eligible for deployment", context.event_name),
        };
    };

    if pr.base_owner == context.owner {
        return EligibilityVerdict {
            eligible: true,
            reason: format!("pull request #{} targets its own repository", pr.number),
        };
    }

    if collaborator_opt_in {
        return EligibilityVerdict {
            eligible: true,
            reason: format!(
                "forked pull request #{} was opted in by a collaborator via `{}`",
                pr.number, OPT_IN_COMMAND
            ),
        };
    }

    EligibilityVerdict {
        eligible: false,
        reason: format!(
            "Deployment skipped: pull request #{} comes from a fork. \
             A collaborator with write access can enable it by commenting `{}`.",
            pr.number, OPT_IN_COMMAND
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PullRequestContext;

    fn context(pull_request: Option<PullRequestContext>) -> GithubContext {
        GithubContext {
            owner: "acme".to_string(),
            repo: "demo".to_string(),
            sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            git_ref: "refs/heads/main".to_string(),
            actor: "octocat".to_string(),
            event_name: if pull_request.is_some() {
                "pull_request".to_string()
            } else {
                "push".to_string()
            },
            server_url: "https://github.com".to_string(),
            run_id: None,
            pull_request,
            head_commit_message: None,
        }
    }

    fn pr(base_owner: &str) -> PullRequestContext {
        PullRequestContext {
            number: 17,
            head_sha: "feedfacefeedfacefeedfacefeedfacefeedface".to_string(),
            head_ref: "feature-x".to_string(),
            base_owner: base_owner.to_string(),
        }
    }

    #[test]
    fn test_push_event_is_eligible() {
        let verdict = evaluate_eligibility(&context(None), false);
        assert!(verdict.eligible);
    }

    #[test]
    fn test_same_owner_pull_request_is_eligible() {
        let verdict = evaluate_eligibility(&context(Some(pr("acme"))), false);
        assert!(verdict.eligible);
    }

    #[test]
    fn test_forked_pull_request_is_rejected() {
        let verdict = evaluate_eligibility(&context(Some(pr("someone-else"))), false);
        assert!(!verdict.eligible);
        assert!(verdict.reason.contains(OPT_IN_COMMAND));
    }

    #[test]
    fn test_forked_pull_request_with_opt_in_is_eligible() {
        let verdict = evaluate_eligibility(&context(Some(pr("someone-else"))), true);
        assert!(verdict.eligible);
        assert!(verdict.reason.contains("opted in"));
    }
}
