//! Vercel CLI subprocess invocation.

use crate::args::{build_deploy_args, DeploymentMeta};
use crate::error::{Result, VercelError};
use crate::inspect::{extract_project_name, find_inspect_url};
use futures::future::try_join;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

/// Settings for driving the Vercel CLI.
#[derive(Debug, Clone)]
pub struct VercelSettings {
    /// Deployment token, passed as `-t`. Never logged.
    pub token: String,

    /// Exported as `VERCEL_ORG_ID` to the CLI.
    pub org_id: String,

    /// Exported as `VERCEL_PROJECT_ID` to the CLI.
    pub project_id: String,

    /// Team scope passed as `--scope`.
    pub scope: Option<String>,

    /// Free-form user arguments, tokenized before the vector is built.
    pub extra_args: String,

    /// Version pin; when set the CLI runs as `npx --yes vercel@<version>`.
    pub version: Option<String>,

    /// Explicit CLI path. Wins over the version pin.
    pub binary: Option<PathBuf>,

    /// Directory the CLI runs in.
    pub working_directory: Option<PathBuf>,
}

/// Outcome of one deploy invocation.
///
/// Either URL may be empty; downstream consumers substitute
/// placeholders rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Live deployment URL, taken from the CLI's stdout.
    pub deployment_url: String,

    /// Dashboard link, taken from the `Inspect:` stderr line.
    pub inspect_url: String,
}

struct CapturedOutput {
    stdout: String,
    stderr: String,
    exit_code: i32,
    success: bool,
}

/// Wrapper around the Vercel CLI subprocess.
pub struct VercelClient {
    settings: VercelSettings,
}

impl VercelClient {
    /// Create a new client over the given settings.
    pub fn new(settings: VercelSettings) -> Self {
        Self { settings }
    }

    /// Deploy the current working tree.
    ///
    /// Builds the argument vector (user tokens, auth token, merged
    /// metadata, optional scope), runs the CLI and captures stdout as
    /// the deployment URL and the stderr `Inspect:` line as the
    /// dashboard link. A non-zero exit is fatal; an empty URL is only
    /// a warning.
    pub async fn deploy(&self, meta: &DeploymentMeta) -> Result<DeploymentResult> {
        let args = build_deploy_args(
            &self.settings.extra_args,
            &self.settings.token,
            self.settings.scope.as_deref(),
            meta,
        );

        info!("Deploying commit {}", meta.commit_sha);
        let captured = self.run_streamed(args).await?;
        if !captured.success {
            return Err(VercelError::CommandFailed {
                code: captured.exit_code,
            });
        }

        let deployment_url = captured.stdout.trim().to_string();
        if deployment_url.is_empty() {
            warn!("Vercel CLI produced no deployment URL");
        }
        let inspect_url = find_inspect_url(&captured.stderr).unwrap_or_default();

        Ok(DeploymentResult {
            deployment_url,
            inspect_url,
        })
    }

    /// Resolve the project name for a deployment via `vercel inspect`.
    ///
    /// The CLI emits its metadata table on stderr; `None` means the
    /// table had no `name` row.
    pub async fn inspect(&self, deployment_url: &str) -> Result<Option<String>> {
        let mut args = vec![
            "inspect".to_string(),
            deployment_url.to_string(),
            "-t".to_string(),
            self.settings.token.clone(),
        ];
        if let Some(scope) = &self.settings.scope {
            args.push("--scope".to_string());
            args.push(scope.clone());
        }

        info!("Inspecting deployment {deployment_url}");
        let captured = self.run_streamed(args).await?;
        if !captured.success {
            return Err(VercelError::CommandFailed {
                code: captured.exit_code,
            });
        }

        Ok(extract_project_name(&captured.stderr))
    }

    /// Resolve the program and leading arguments for an invocation.
    fn command(&self) -> (String, Vec<String>) {
        if let Some(binary) = &self.settings.binary {
            return (binary.to_string_lossy().into_owned(), Vec::new());
        }
        match &self.settings.version {
            Some(version) => (
                "npx".to_string(),
                vec!["--yes".to_string(), format!("vercel@{version}")],
            ),
            None => ("vercel".to_string(), Vec::new()),
        }
    }

    /// Run one CLI invocation, draining stdout and stderr concurrently.
    ///
    /// Every line is mirrored to the log as it arrives; the call
    /// returns only once the child has fully exited.
    async fn run_streamed(&self, args: Vec<String>) -> Result<CapturedOutput> {
        let (program, mut argv) = self.command();
        argv.extend(args);

        let mut cmd = Command::new(&program);
        cmd.args(&argv)
            .env("VERCEL_ORG_ID", &self.settings.org_id)
            .env("VERCEL_PROJECT_ID", &self.settings.project_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.settings.working_directory {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(VercelError::Spawn)?;
        let stdout = child.stdout.take().expect("stdout is piped");
        let stderr = child.stderr.take().expect("stderr is piped");

        let drain_stdout = async {
            let mut lines = BufReader::new(stdout).lines();
            let mut acc = String::new();
            while let Some(line) = lines.next_line().await? {
                info!("{line}");
                acc.push_str(&line);
            }
            Ok::<_, std::io::Error>(acc)
        };
        let drain_stderr = async {
            let mut lines = BufReader::new(stderr).lines();
            let mut acc = String::new();
            while let Some(line) = lines.next_line().await? {
                info!("{line}");
                acc.push_str(&line);
                acc.push('\n');
            }
            Ok::<_, std::io::Error>(acc)
        };

        let (stdout, stderr) = try_join(drain_stdout, drain_stderr).await?;
        let status = child.wait().await?;

        Ok(CapturedOutput {
            stdout,
            stderr,
            exit_code: status.code().unwrap_or(-1),
            success: status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> VercelSettings {
        VercelSettings {
            token: "tok_123".to_string(),
            org_id: "org_123".to_string(),
            project_id: "prj_123".to_string(),
            scope: None,
            extra_args: String::new(),
            version: None,
            binary: None,
            working_directory: None,
        }
    }

    #[test]
    fn test_command_defaults_to_path_lookup() {
        let client = VercelClient::new(settings());
        let (program, argv) = client.command();
        assert_eq!(program, "vercel");
        assert!(argv.is_empty());
    }

    #[test]
    fn test_command_version_pin_uses_npx() {
        let mut s = settings();
        s.version = Some("28.4.17".to_string());
        let (program, argv) = VercelClient::new(s).command();
        assert_eq!(program, "npx");
        assert_eq!(argv, vec!["--yes", "vercel@28.4.17"]);
    }

    #[test]
    fn test_command_binary_override_wins() {
        let mut s = settings();
        s.version = Some("28.4.17".to_string());
        s.binary = Some(PathBuf::from("/opt/vercel/bin/vercel"));
        let (program, argv) = VercelClient::new(s).command();
        assert_eq!(program, "/opt/vercel/bin/vercel");
        assert!(argv.is_empty());
    }
}
