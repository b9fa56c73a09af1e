//! Action configuration
//!
//! GitHub Actions hands inputs to the process as `INPUT_*` environment
//! variables, with unset optional inputs arriving as empty strings. The
//! configuration is read once into an immutable [`ActionConfig`] and
//! passed by reference into each component.

use crate::error::{ActionError, Result};
use std::path::PathBuf;

/// Immutable configuration for one action run.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Vercel deployment token. Never logged.
    pub vercel_token: String,

    /// Vercel organization id, exported as `VERCEL_ORG_ID` to the CLI.
    pub vercel_org_id: String,

    /// Vercel project id, exported as `VERCEL_PROJECT_ID` to the CLI.
    pub vercel_project_id: String,

    /// Explicit project name. When set, the inspect step is skipped.
    pub vercel_project_name: Option<String>,

    /// Team scope passed as `--scope`.
    pub scope: Option<String>,

    /// Free-form extra CLI arguments, tokenized before use.
    pub vercel_args: String,

    /// Version pin; when set the CLI runs as `npx --yes vercel@<version>`.
    pub vercel_version: Option<String>,

    /// Explicit path to the Vercel CLI. Wins over the version pin.
    pub vercel_bin: Option<PathBuf>,

    /// Directory the CLI is invoked from.
    pub working_directory: Option<PathBuf>,

    /// Whether to upsert the templated comment (default true).
    pub github_comment: bool,

    /// GitHub access token. When absent, no comment or status reporting
    /// happens at all.
    pub github_token: Option<String>,
}

impl ActionConfig {
    /// Read the configuration from the `INPUT_*` environment surface.
    ///
    /// Fails fast on missing required inputs, before any subprocess runs.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary input source.
    ///
    /// `lookup` receives the full environment variable name
    /// (e.g. `INPUT_VERCEL-TOKEN`). Empty values count as absent, which
    /// is how the Actions runner represents unset optional inputs.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let input = |name: &'static str| -> Option<String> {
            let var = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
            lookup(&var).filter(|v| !v.trim().is_empty())
        };
        let required = |name: &'static str| -> Result<String> {
            input(name).ok_or(ActionError::MissingInput(name))
        };

        Ok(Self {
            vercel_token: required("vercel-token")?,
            vercel_org_id: required("vercel-org-id")?,
            vercel_project_id: required("vercel-project-id")?,
            vercel_project_name: input("vercel-project-name"),
            scope: input("scope"),
            vercel_args: input("vercel-args").unwrap_or_default(),
            vercel_version: input("vercel-version"),
            vercel_bin: input("vercel-bin").map(PathBuf::from),
            working_directory: input("working-directory").map(PathBuf::from),
            github_comment: input("github-comment")
                .map(|v| v.trim() != "false")
                .unwrap_or(true),
            github_token: input("github-token"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn inputs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config_from(map: &HashMap<String, String>) -> Result<ActionConfig> {
        ActionConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_minimal_config() {
        let map = inputs(&[
            ("INPUT_VERCEL-TOKEN", "tok_123"),
            ("INPUT_VERCEL-ORG-ID", "org_123"),
            ("INPUT_VERCEL-PROJECT-ID", "prj_123"),
        ]);

        let config = config_from(&map).expect("config should parse");
        assert_eq!(config.vercel_token, "tok_123");
        assert_eq!(config.vercel_org_id, "org_123");
        assert_eq!(config.vercel_project_id, "prj_123");
        assert!(config.vercel_project_name.is_none());
        assert!(config.scope.is_none());
        assert_eq!(config.vercel_args, "");
        assert!(config.github_comment);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_missing_required_input_fails() {
        let map = inputs(&[
            ("INPUT_VERCEL-TOKEN", "tok_123"),
            ("INPUT_VERCEL-ORG-ID", "org_123"),
        ]);

        let err = config_from(&map).expect_err("missing project id must fail");
        assert!(matches!(
            err,
            ActionError::MissingInput("vercel-project-id")
        ));
    }

    #[test]
    fn test_empty_input_counts_as_absent() {
        let map = inputs(&[
            ("INPUT_VERCEL-TOKEN", "tok_123"),
            ("INPUT_VERCEL-ORG-ID", "org_123"),
            ("INPUT_VERCEL-PROJECT-ID", "prj_123"),
            ("INPUT_SCOPE", ""),
            ("INPUT_VERCEL-PROJECT-NAME", "   "),
        ]);

        let config = config_from(&map).expect("config should parse");
        assert!(config.scope.is_none());
        assert!(config.vercel_project_name.is_none());
    }

    #[test]
    fn test_comment_flag_disabled() {
        let map = inputs(&[
            ("INPUT_VERCEL-TOKEN", "tok_123"),
            ("INPUT_VERCEL-ORG-ID", "org_123"),
            ("INPUT_VERCEL-PROJECT-ID", "prj_123"),
            ("INPUT_GITHUB-COMMENT", "false"),
        ]);

        let config = config_from(&map).expect("config should parse");
        assert!(!config.github_comment);
    }

    #[test]
    fn test_optional_inputs_parsed() {
        let map = inputs(&[
            ("INPUT_VERCEL-TOKEN", "tok_123"),
            ("INPUT_VERCEL-ORG-ID", "org_123"),
            ("INPUT_VERCEL-PROJECT-ID", "prj_123"),
            ("INPUT_VERCEL-ARGS", "--prod --env KEY=value"),
            ("INPUT_VERCEL-VERSION", "28.4.17"),
            ("INPUT_WORKING-DIRECTORY", "./web"),
            ("INPUT_GITHUB-TOKEN", "ghp_abc"),
        ]);

        let config = config_from(&map).expect("config should parse");
        assert_eq!(config.vercel_args, "--prod --env KEY=value");
        assert_eq!(config.vercel_version.as_deref(), Some("28.4.17"));
        assert_eq!(config.working_directory, Some(PathBuf::from("./web")));
        assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
    }
}
