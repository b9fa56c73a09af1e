//! Structured-result extraction from CLI text output.
//!
//! The CLI reports human-readable text, not machine output: the deploy
//! command announces its dashboard link on stderr and `vercel inspect`
//! prints a loosely aligned table there. Parsing is confined to this
//! module so the strategy can be replaced (say, by a JSON output mode)
//! without touching callers.

use regex::Regex;
use std::sync::OnceLock;

/// Marker introducing the dashboard link on the deploy stderr stream.
const INSPECT_MARKER: &str = "Inspect: https://vercel.com";

static NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Dashboard link from the deploy stderr stream.
///
/// The first line starting with `Inspect: https://vercel.com` wins; the
/// `Inspect: ` marker is stripped and the remainder trimmed.
pub fn find_inspect_url(stderr: &str) -> Option<String> {
    stderr
        .lines()
        .find(|line| line.starts_with(INSPECT_MARKER))
        .and_then(|line| line.strip_prefix("Inspect: "))
        .map(|url| url.trim().to_string())
}

/// Project name from the `vercel inspect` table.
///
/// Matches the first `    name   <value>` row; `None` when the table
/// has no such row.
pub fn extract_project_name(stderr: &str) -> Option<String> {
    let re = NAME_RE
        .get_or_init(|| Regex::new(r"(?m)^\s+name\s+(.+)$").expect("static name pattern"));
    re.captures(stderr)
        .map(|caps| caps[1].trim().to_string())
}
