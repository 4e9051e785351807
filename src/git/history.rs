//! History providers: where commit and tag queries are answered.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::commit::{parse_log_output, Commit, LOG_FORMAT};
use super::error::GitError;

/// Glob matched against tag names to find releases.
pub const RELEASE_TAG_PATTERN: &str = "v*";

/// Answers the history questions a changeset can ask.
///
/// `log_args` are passed to `git log` after the format option, so they may
/// contain revision ranges (`a..b`), limits (`-n 3`) or date filters.
pub trait HistoryProvider {
    /// Returns the commits selected by `log_args`, newest first.
    fn log(&self, log_args: &[String]) -> Result<Vec<Commit>, GitError>;

    /// Returns release tag names, most recently created first.
    fn release_tags(&self) -> Result<Vec<String>, GitError>;
}

/// History provider backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Creates a provider running git in the current directory.
    pub fn new() -> Self {
        Self::open_at(".")
    }

    /// Creates a provider running git inside `workdir`.
    pub fn open_at<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Runs git with `args`, returning stdout or the captured stderr as an error.
    fn run(&self, args: &[String]) -> Result<String, GitError> {
        debug!(workdir = %self.workdir.display(), ?args, "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(status = ?output.status.code(), %stderr, "git exited unsuccessfully");
            return Err(GitError::CommandFailed(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryProvider for GitCli {
    fn log(&self, log_args: &[String]) -> Result<Vec<Commit>, GitError> {
        let mut args = vec!["log".to_string(), format!("--format={LOG_FORMAT}")];
        args.extend(log_args.iter().cloned());

        let stdout = self.run(&args)?;
        let commits = parse_log_output(&stdout);
        debug!(count = commits.len(), "Parsed git log output");
        Ok(commits)
    }

    fn release_tags(&self) -> Result<Vec<String>, GitError> {
        let args = [
            "tag".to_string(),
            "--sort=-creatordate".to_string(),
            "--list".to_string(),
            RELEASE_TAG_PATTERN.to_string(),
        ];

        let stdout = self.run(&args)?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect())
    }
}
