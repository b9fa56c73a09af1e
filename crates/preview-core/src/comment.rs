//! Preview comment rendering
//!
//! The comment is found again on later runs through a stable HTML
//! marker, so the reporter can update in place instead of stacking a
//! new comment per push.

use chrono::Utc;

/// Stable marker embedded in every comment this action writes.
/// The upsert lookup keys on it.
pub const COMMENT_MARKER: &str = "<!-- vercel-preview-action -->";

/// Everything the reporter needs to render the preview comment.
///
/// All fields except the commit SHA are optional; absent values render
/// as placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentContext {
    /// Commit the preview was built from.
    pub commit_sha: String,

    /// Resolved project name.
    pub name: Option<String>,

    /// Live deployment URL.
    pub deployment_url: Option<String>,

    /// Dashboard link for the deployment.
    pub inspect_url: Option<String>,

    /// Verbatim body override. Used for the fork-skip explanation;
    /// the marker is still prepended so the upsert stays idempotent.
    pub body: Option<String>,
}

impl CommentContext {
    /// Short display form of the commit SHA (7 characters).
    pub fn short_sha(&self) -> &str {
        &self.commit_sha[..7.min(self.commit_sha.len())]
    }

    /// Render the comment body as GitHub-flavored markdown.
    pub fn render(&self) -> String {
        if let Some(body) = &self.body {
            return format!("{COMMENT_MARKER}\n{body}");
        }

        let name = self.name.as_deref().unwrap_or("N/A");
        let preview = self
            .deployment_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or("Pending");
        let inspect = self
            .inspect_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or("N/A");
        let updated = Utc::now().format("%Y-%m-%d %H:%M:%S");

        format!(
            "{COMMENT_MARKER}\n\
             **Vercel preview deployment**\n\n\
             | | |\n\
             | :--- | :--- |\n\
             | Project | {name} |\n\
             | Preview | {preview} |\n\
             | Inspect | {inspect} |\n\
             | Commit | `{sha}` |\n\n\
             _Updated (UTC): {updated}_",
            sha = self.short_sha(),
        )
    }
}
