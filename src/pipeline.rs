//! End-to-end run: commits in, report out.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::ActionInputs;
use crate::git::{fetch_commits, HistoryProvider};
use crate::linear::{fetch_team_keys, linear_base_url, LinearClient};
use crate::output::{build_output_artifact, write_output_file, ActionOutputs, IssueReference};
use crate::scanner::scan_commits_for_issues;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Issues found, in key order.
    pub issues: Vec<IssueReference>,
    /// Number of commits scanned.
    pub total_commits: usize,
    /// Step outputs to publish.
    pub outputs: ActionOutputs,
}

/// Runs the scan and writes the artifact to `inputs.output_file`.
///
/// Nothing is written unless every earlier step succeeded.
pub async fn run<H: HistoryProvider + ?Sized>(
    inputs: &ActionInputs,
    history: &H,
    linear: &LinearClient,
    repository: &str,
) -> Result<RunSummary> {
    info!("Fetching team keys from Linear...");
    let team_keys = fetch_team_keys(linear, inputs.team_keys.as_deref()).await?;
    info!(
        "Found {} team(s): {}",
        team_keys.len(),
        team_keys.join(", ")
    );

    info!(
        kind = inputs.changeset.kind(),
        changeset = %inputs.changeset,
        "Fetching commits..."
    );
    let commits = fetch_commits(history, &inputs.changeset)?;
    info!("Found {} commit(s)", commits.len());
    for commit in &commits {
        debug!(sha = commit.short_sha(), message = %commit.message, "Commit");
    }

    info!("Scanning commits for Linear issues...");
    let issues: Vec<IssueReference> = scan_commits_for_issues(&commits, &team_keys)
        .context("Failed to build issue key pattern")?
        .into_iter()
        .map(|issue| IssueReference::from_scanned(issue, &inputs.workspace_slug))
        .collect();
    info!("Found {} unique Linear issue(s)", issues.len());

    let artifact = build_output_artifact(
        issues,
        &inputs.changeset,
        &linear_base_url(&inputs.workspace_slug),
        repository,
        commits.len(),
    );

    info!("Writing output to {}...", inputs.output_file.display());
    write_output_file(&inputs.output_file, &artifact)?;

    let outputs = ActionOutputs::from_issues(&artifact.issues);
    Ok(RunSummary {
        issues: artifact.issues,
        total_commits: commits.len(),
        outputs,
    })
}
