//! Workflow step outputs (`issue-keys`, `issue-links`, `issue-count`).

use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::IssueReference;

/// Environment variable naming the file step outputs are appended to.
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";

/// Step outputs derived from the discovered issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutputs {
    /// Comma-joined issue keys.
    pub issue_keys: String,
    /// Comma-joined issue URLs.
    pub issue_links: String,
    /// Number of issues.
    pub issue_count: usize,
}

impl ActionOutputs {
    /// Derives outputs from `issues`.
    pub fn from_issues(issues: &[IssueReference]) -> Self {
        Self {
            issue_keys: issues
                .iter()
                .map(|i| i.key.as_str())
                .collect::<Vec<_>>()
                .join(","),
            issue_links: issues
                .iter()
                .map(|i| i.url.as_str())
                .collect::<Vec<_>>()
                .join(","),
            issue_count: issues.len(),
        }
    }

    /// Renders the outputs as `name=value` lines.
    pub fn to_lines(&self) -> String {
        format!(
            "issue-keys={}\nissue-links={}\nissue-count={}\n",
            self.issue_keys, self.issue_links, self.issue_count
        )
    }

    /// Appends the outputs to the file at `path`.
    pub fn append_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open step output file: {}", path.display()))?;
        file.write_all(self.to_lines().as_bytes())
            .with_context(|| format!("Failed to write step outputs: {}", path.display()))
    }

    /// Publishes the outputs to `$GITHUB_OUTPUT`, or stdout outside Actions.
    pub fn publish(&self) -> Result<()> {
        let output_file = std::env::var_os(GITHUB_OUTPUT_VAR);
        self.publish_to(output_file.as_deref(), &mut io::stdout().lock())
    }

    /// Appends to `output_file` when it is set and non-empty, else writes to `fallback`.
    pub fn publish_to<W: Write>(&self, output_file: Option<&OsStr>, fallback: &mut W) -> Result<()> {
        match output_file {
            Some(path) if !path.is_empty() => {
                debug!(path = ?path, "Writing step outputs");
                self.append_to(path)
            }
            _ => fallback
                .write_all(self.to_lines().as_bytes())
                .context("Failed to print step outputs"),
        }
    }
}
