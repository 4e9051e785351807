//! Report artifact: assembly and writing.

pub mod actions;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::changeset::Changeset;
use crate::linear::build_issue_url;
use crate::scanner::ScannedIssue;

pub use actions::ActionOutputs;

/// An issue referenced by the scanned commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueReference {
    /// Upper-cased issue key.
    pub key: String,
    /// Web URL of the issue.
    pub url: String,
    /// Shas of the referencing commits, in first-seen order.
    pub commits: Vec<String>,
}

impl IssueReference {
    /// Attaches the issue URL to a scanned issue.
    pub fn from_scanned(issue: ScannedIssue, workspace_slug: &str) -> Self {
        let url = build_issue_url(workspace_slug, &issue.key);
        Self {
            key: issue.key,
            url,
            commits: issue.commits,
        }
    }
}

/// Run metadata recorded alongside the issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMetadata {
    /// RFC 3339 UTC timestamp of report creation.
    pub generated_at: String,
    /// Linear web base URL.
    pub linear_base_url: String,
    /// `owner/repo` slug.
    pub repository: String,
    /// The selector that produced the commits.
    pub changeset: Changeset,
    /// Number of distinct issues.
    pub total_issues: usize,
    /// Number of commits scanned.
    pub total_commits: usize,
}

/// The JSON document written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArtifact {
    /// Run metadata.
    pub metadata: OutputMetadata,
    /// Issues in key order.
    pub issues: Vec<IssueReference>,
}

/// Formats a timestamp the way the artifact records it: `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Assembles the artifact, stamped with the current time.
pub fn build_output_artifact(
    issues: Vec<IssueReference>,
    changeset: &Changeset,
    linear_base_url: &str,
    repository: &str,
    total_commits: usize,
) -> OutputArtifact {
    build_output_artifact_at(
        Utc::now(),
        issues,
        changeset,
        linear_base_url,
        repository,
        total_commits,
    )
}

/// Assembles the artifact with an explicit creation time.
pub fn build_output_artifact_at(
    generated_at: DateTime<Utc>,
    issues: Vec<IssueReference>,
    changeset: &Changeset,
    linear_base_url: &str,
    repository: &str,
    total_commits: usize,
) -> OutputArtifact {
    OutputArtifact {
        metadata: OutputMetadata {
            generated_at: format_timestamp(generated_at),
            linear_base_url: linear_base_url.to_string(),
            repository: repository.to_string(),
            changeset: changeset.clone(),
            total_issues: issues.len(),
            total_commits,
        },
        issues,
    }
}

/// Writes the artifact as pretty-printed JSON, replacing any existing file.
pub fn write_output_file<P: AsRef<Path>>(path: P, artifact: &OutputArtifact) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(artifact).context("Failed to serialize output artifact")?;
    fs::write(path, json).with_context(|| format!("Failed to write output file: {}", path.display()))
}
