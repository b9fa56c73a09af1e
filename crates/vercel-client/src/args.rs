//! Deploy argument construction.
//!
//! User-supplied arguments are tokenized with shell-like quoting and
//! always win over computed metadata: a key the user already passed as
//! `key=value` is never appended a second time. Tokens are never
//! reordered, only included or skipped.

use regex::Regex;
use std::sync::OnceLock;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

/// Split a free-form argument string into discrete tokens.
///
/// A single-quoted run is one token with the quotes stripped and any
/// interior double quotes kept verbatim; a double-quoted run works the
/// same with the roles swapped. Everything else splits on whitespace.
/// An unmatched quote stays in the token as a literal character; no
/// input fails to tokenize, and empty input yields no tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    let re = TOKEN_RE
        .get_or_init(|| Regex::new(r#"'([^']*)'|"([^"]*)"|\S+"#).expect("static token pattern"));
    re.captures_iter(input)
        .map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .collect()
}

/// One `-m key=value` metadata flag, or nothing when the user already
/// supplied the key.
///
/// The membership test is anchored at the token start and requires a
/// non-empty value: only `key=<something>` suppresses the computed
/// flag.
pub fn merge_metadata(
    key: &str,
    value: impl std::fmt::Display,
    provided: &[String],
) -> Vec<String> {
    let prefix = format!("{key}=");
    let user_supplied = provided
        .iter()
        .any(|token| token.starts_with(&prefix) && token.len() > prefix.len());
    if user_supplied {
        return Vec::new();
    }
    vec!["-m".to_string(), format!("{prefix}{value}")]
}

/// Contextual information attached to a deployment as `-m` flags.
#[derive(Debug, Clone)]
pub struct DeploymentMeta {
    /// Full commit SHA, never truncated.
    pub commit_sha: String,

    /// Login of the user that triggered the run.
    pub actor: String,

    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Commit message; quoted defensively before being passed on.
    pub commit_message: String,

    /// Ref being deployed; a leading `refs/heads/` is stripped.
    pub git_ref: String,
}

/// Build the full argument vector for a deploy invocation:
/// user tokens, the auth token pair, metadata flags in a fixed order,
/// then the optional scope pair.
pub fn build_deploy_args(
    extra_args: &str,
    token: &str,
    scope: Option<&str>,
    meta: &DeploymentMeta,
) -> Vec<String> {
    let provided = tokenize(extra_args);

    let mut args = provided.clone();
    args.push("-t".to_string());
    args.push(token.to_string());

    let branch = meta
        .git_ref
        .strip_prefix("refs/heads/")
        .unwrap_or(&meta.git_ref);
    let quoted_message = format!("\"{}\"", meta.commit_message);

    args.extend(merge_metadata("githubCommitSha", &meta.commit_sha, &provided));
    args.extend(merge_metadata("githubCommitAuthorName", &meta.actor, &provided));
    args.extend(merge_metadata("githubCommitAuthorLogin", &meta.actor, &provided));
    args.extend(merge_metadata("githubDeployment", 1, &provided));
    args.extend(merge_metadata("githubOrg", &meta.owner, &provided));
    args.extend(merge_metadata("githubRepo", &meta.repo, &provided));
    args.extend(merge_metadata("githubCommitOrg", &meta.owner, &provided));
    args.extend(merge_metadata("githubCommitRepo", &meta.repo, &provided));
    args.extend(merge_metadata("githubCommitMessage", &quoted_message, &provided));
    args.extend(merge_metadata("githubCommitRef", branch, &provided));

    if let Some(scope) = scope {
        args.push("--scope".to_string());
        args.push(scope.to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> DeploymentMeta {
        DeploymentMeta {
            commit_sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            actor: "octocat".to_string(),
            owner: "acme".to_string(),
            repo: "demo".to_string(),
            commit_message: "fix: typo".to_string(),
            git_ref: "refs/heads/main".to_string(),
        }
    }

    #[test]
    fn test_tokenize_mixed_quoting() {
        let tokens = tokenize(r#"--env foo=bar "foo=bar baz" 'foo="bar baz"'"#);
        assert_eq!(
            tokens,
            vec!["--env", "foo=bar", "foo=bar baz", r#"foo="bar baz""#]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_unmatched_quote_is_literal() {
        assert_eq!(tokenize("don't panic"), vec!["don't", "panic"]);
        assert_eq!(tokenize("'abc"), vec!["'abc"]);
    }

    #[test]
    fn test_merge_metadata_appended_when_absent() {
        let provided = tokenize("--prod");
        assert_eq!(
            merge_metadata("githubCommitSha", "abc", &provided),
            vec!["-m", "githubCommitSha=abc"]
        );
    }

    #[test]
    fn test_merge_metadata_user_wins() {
        let provided = tokenize("-m githubCommitSha=custom");
        assert!(merge_metadata("githubCommitSha", "abc", &provided).is_empty());
    }

    #[test]
    fn test_merge_metadata_requires_value() {
        // `key=` with no value does not count as user-supplied.
        let provided = vec!["githubCommitSha=".to_string()];
        assert_eq!(
            merge_metadata("githubCommitSha", "abc", &provided),
            vec!["-m", "githubCommitSha=abc"]
        );
    }

    #[test]
    fn test_merge_metadata_anchored_at_token_start() {
        let provided = vec!["xgithubCommitSha=1".to_string()];
        assert_eq!(
            merge_metadata("githubCommitSha", "abc", &provided),
            vec!["-m", "githubCommitSha=abc"]
        );
    }

    #[test]
    fn test_merge_metadata_integer_value() {
        assert_eq!(
            merge_metadata("githubDeployment", 1, &[]),
            vec!["-m", "githubDeployment=1"]
        );
    }

    #[test]
    fn test_deploy_args_layout() {
        let args = build_deploy_args("--prod", "tok_123", Some("acme-team"), &meta());

        // User tokens first, then the auth pair.
        assert_eq!(&args[..3], &["--prod", "-t", "tok_123"]);

        // Metadata flags in the fixed order.
        let flags: Vec<&str> = args
            .iter()
            .zip(args.iter().skip(1))
            .filter(|(flag, _)| flag.as_str() == "-m")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(
            flags,
            vec![
                "githubCommitSha=0123456789abcdef0123456789abcdef01234567",
                "githubCommitAuthorName=octocat",
                "githubCommitAuthorLogin=octocat",
                "githubDeployment=1",
                "githubOrg=acme",
                "githubRepo=demo",
                "githubCommitOrg=acme",
                "githubCommitRepo=demo",
                "githubCommitMessage=\"fix: typo\"",
                "githubCommitRef=main",
            ]
        );

        // Scope pair last.
        assert_eq!(&args[args.len() - 2..], &["--scope", "acme-team"]);
    }

    #[test]
    fn test_deploy_args_without_scope() {
        let args = build_deploy_args("", "tok_123", None, &meta());
        assert_eq!(&args[..2], &["-t", "tok_123"]);
        assert!(!args.contains(&"--scope".to_string()));
    }

    #[test]
    fn test_deploy_args_skip_user_supplied_key() {
        let args = build_deploy_args("-m githubCommitRef=custom", "tok_123", None, &meta());

        let ref_flags: Vec<&String> = args
            .iter()
            .filter(|a| a.starts_with("githubCommitRef="))
            .collect();
        assert_eq!(ref_flags, vec!["githubCommitRef=custom"]);
    }

    #[test]
    fn test_deploy_args_branch_ref_kept_verbatim() {
        let mut m = meta();
        m.git_ref = "feature-x".to_string();
        let args = build_deploy_args("", "tok_123", None, &m);
        assert!(args.contains(&"githubCommitRef=feature-x".to_string()));
    }
}
