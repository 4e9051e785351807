//! CLI interface for linear-scan.
//!
//! Every flag can also be supplied as a GitHub Actions input, which the
//! runner exposes as `INPUT_<NAME>` (e.g. `INPUT_COMMITS-COUNT`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::changeset::ChangesetInputs;
use crate::config::{ActionInputs, RawInputs};
use crate::git::{detect_repository, GitCli};
use crate::linear::LinearClient;
use crate::pipeline::{self, RunSummary};

/// Fallback environment variable for the API key outside Actions.
pub const LINEAR_API_KEY_VAR: &str = "LINEAR_API_KEY";

/// linear-scan: finds Linear issue keys in a selected set of commits.
#[derive(Parser, Debug, Default)]
#[command(name = "linear-scan")]
#[command(
    about = "Scans git commits for Linear issue references and writes a JSON report",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Linear API key (falls back to LINEAR_API_KEY).
    #[arg(long, env = "INPUT_LINEAR-API-KEY", hide_env_values = true)]
    pub linear_api_key: Option<String>,

    /// Comma-separated team keys to scan for (default: all teams).
    #[arg(long, env = "INPUT_TEAM-KEYS")]
    pub team_keys: Option<String>,

    /// Path of the JSON report.
    #[arg(long, env = "INPUT_OUTPUT-FILE")]
    pub output_file: Option<String>,

    /// Linear workspace slug used in issue URLs.
    #[arg(long, env = "INPUT_WORKSPACE-SLUG")]
    pub workspace_slug: Option<String>,

    /// Directory of the git repository to scan.
    #[arg(long, env = "INPUT_WORKING-DIRECTORY")]
    pub working_directory: Option<String>,

    /// Everything since this many releases ago (tags matching v*).
    #[arg(long, env = "INPUT_RELEASES-COUNT")]
    pub releases_count: Option<String>,

    /// Start of a time range (ISO-8601); needs --time-range-end.
    #[arg(long, env = "INPUT_TIME-RANGE-START")]
    pub time_range_start: Option<String>,

    /// End of a time range (ISO-8601); needs --time-range-start.
    #[arg(long, env = "INPUT_TIME-RANGE-END")]
    pub time_range_end: Option<String>,

    /// The most recent N commits.
    #[arg(long, env = "INPUT_COMMITS-COUNT")]
    pub commits_count: Option<String>,

    /// Commits after this sha, up to HEAD.
    #[arg(long, env = "INPUT_COMMITS-SINCE-SHA")]
    pub commits_since_sha: Option<String>,

    /// Comma-separated list of specific commits.
    #[arg(long, env = "INPUT_COMMITS-SHAS")]
    pub commits_shas: Option<String>,

    /// Start of a commit range (exclusive unless --include-start-commit true).
    #[arg(long, env = "INPUT_COMMITS-START-SHA")]
    pub commits_start_sha: Option<String>,

    /// End of a commit range (default: HEAD).
    #[arg(long, env = "INPUT_COMMITS-END-SHA")]
    pub commits_end_sha: Option<String>,

    /// Whether the commit range includes its start commit ("true"/"false").
    #[arg(long, env = "INPUT_INCLUDE-START-COMMIT")]
    pub include_start_commit: Option<String>,

    /// Start tag of a tag range (exclusive).
    #[arg(long, env = "INPUT_TAGS-START")]
    pub tags_start: Option<String>,

    /// End of a tag range (default: HEAD).
    #[arg(long, env = "INPUT_TAGS-END")]
    pub tags_end: Option<String>,
}

impl Cli {
    /// Collects the raw inputs, applying the API key fallback.
    pub fn raw_inputs(&self) -> RawInputs {
        let linear_api_key = self
            .linear_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(LINEAR_API_KEY_VAR).ok());

        RawInputs {
            linear_api_key,
            team_keys: self.team_keys.clone(),
            output_file: self.output_file.clone(),
            workspace_slug: self.workspace_slug.clone(),
            changeset: ChangesetInputs {
                releases_count: self.releases_count.clone(),
                time_range_start: self.time_range_start.clone(),
                time_range_end: self.time_range_end.clone(),
                commits_count: self.commits_count.clone(),
                commits_since_sha: self.commits_since_sha.clone(),
                commits_shas: self.commits_shas.clone(),
                commits_start_sha: self.commits_start_sha.clone(),
                commits_end_sha: self.commits_end_sha.clone(),
                include_start_commit: self.include_start_commit.clone(),
                tags_start: self.tags_start.clone(),
                tags_end: self.tags_end.clone(),
            },
        }
    }

    /// Returns the repository directory, the current directory by default.
    pub fn workdir(&self) -> PathBuf {
        self.working_directory
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    /// Executes the scan and publishes step outputs.
    pub async fn execute(self) -> Result<RunSummary> {
        info!("Parsing inputs...");
        let inputs = ActionInputs::parse(self.raw_inputs())?;
        let workdir = self.workdir();
        let repository = detect_repository(&workdir)?;

        info!("Creating Linear client...");
        let linear = LinearClient::new(inputs.linear_api_key.as_str())?;
        let history = GitCli::open_at(&workdir);

        let summary = pipeline::run(&inputs, &history, &linear, &repository).await?;

        info!("Setting action outputs...");
        summary.outputs.publish()?;

        info!(
            "Completed successfully! Found {} issue(s) in {} commit(s).",
            summary.issues.len(),
            summary.total_commits
        );
        Ok(summary)
    }
}

/// Escapes a message for use in a workflow command.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Renders the `::error::` workflow command that fails an Actions step.
pub fn workflow_error_command(err: &anyhow::Error) -> String {
    format!("::error::{}", escape_workflow_data(&format!("{err:#}")))
}
