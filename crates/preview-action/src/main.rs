//! Vercel preview deployment action
//!
//! Entry point wiring: parse flags, initialise tracing, read the
//! action configuration and GitHub context, then hand off to the
//! orchestrator. Fatal errors fail the step with a non-zero exit after
//! best-effort failure reporting inside the orchestrator.

mod orchestrator;

use anyhow::{Context, Result};
use clap::Parser;
use github_reporter::{GithubClient, GithubConfig, GithubReporter, Platform};
use orchestrator::RunOutcome;
use preview_core::{init_tracing, ActionConfig, GithubContext};
use tracing::{error, info, Level};

#[derive(Parser)]
#[command(name = "preview-action")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deploy a Vercel preview and report back to GitHub", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// GitHub API base URL (the runner exports this, GHES included)
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUNNER_DEBUG is how the Actions runner asks for debug logging.
    let verbose = cli.verbose || std::env::var_os("RUNNER_DEBUG").is_some();
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json, level);

    if let Err(err) = run(cli).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ActionConfig::from_env().context("Failed to read action inputs")?;
    let context = GithubContext::from_env().context("Failed to read GitHub context")?;

    let reporter = config.github_token.as_deref().map(|token| {
        GithubReporter::new(GithubClient::new(
            GithubConfig::new(token, &context.owner, &context.repo).with_api_base(&cli.api_url),
        ))
    });
    if reporter.is_none() {
        info!("No github-token configured; comment and status reporting disabled");
    }
    let platform = reporter.as_ref().map(|r| r as &dyn Platform);

    match orchestrator::run(&config, &context, platform).await? {
        RunOutcome::Skipped { reason } => info!("Run skipped: {reason}"),
        RunOutcome::Deployed {
            deployment_url,
            name,
            ..
        } => info!(
            "Preview ready: {} ({})",
            if deployment_url.is_empty() {
                "<no url>"
            } else {
                deployment_url.as_str()
            },
            name.as_deref().unwrap_or("unnamed"),
        ),
    }
    Ok(())
}
