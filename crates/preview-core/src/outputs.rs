//! Step outputs
//!
//! Actions steps publish outputs by appending `key=value` lines to the
//! file named by `GITHUB_OUTPUT`. Outside a runner the variable is
//! unset and publishing is a no-op.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Publish the `preview-url` and `preview-name` step outputs.
///
/// The URL is always written, empty when the deployment produced none;
/// the name line is omitted when unresolved.
pub fn write_step_outputs(deployment_url: &str, name: Option<&str>) -> Result<()> {
    let Some(path) = std::env::var_os("GITHUB_OUTPUT") else {
        debug!("GITHUB_OUTPUT is not set; skipping step outputs");
        return Ok(());
    };
    append_outputs(Path::new(&path), deployment_url, name)
}

/// Append the output lines to `path`.
pub fn append_outputs(path: &Path, deployment_url: &str, name: Option<&str>) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "preview-url={deployment_url}")?;
    if let Some(name) = name {
        writeln!(file, "preview-name={name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");

        append_outputs(&path, "https://demo-abc.vercel.app", Some("demo")).expect("append");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(
            contents,
            "preview-url=https://demo-abc.vercel.app\npreview-name=demo\n"
        );
    }

    #[test]
    fn test_name_omitted_when_unresolved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");

        append_outputs(&path, "", None).expect("append");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "preview-url=\n");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("output");
        std::fs::write(&path, "other=1\n").expect("seed");

        append_outputs(&path, "https://x.vercel.app", None).expect("append");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "other=1\npreview-url=https://x.vercel.app\n");
    }
}
