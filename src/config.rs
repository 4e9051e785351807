//! Run configuration assembled from workflow inputs.

use std::path::PathBuf;

use thiserror::Error;

use crate::changeset::{Changeset, ChangesetInputs};

/// Output file written when `output-file` is not set.
pub const DEFAULT_OUTPUT_FILE: &str = "linear-issues.json";

/// Configuration errors. All are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No changeset selector group was supplied.
    #[error(
        "No changeset specification provided. Please specify one of: releases-count, \
         time-range-start/end, commits-count, commits-since-sha, commits-shas, \
         commits-start-sha/end-sha, or tags-start/end"
    )]
    NoChangeset,

    /// More than one changeset selector group was supplied.
    #[error("Multiple changeset types specified. Please specify only one changeset type.")]
    MultipleChangesets,

    /// A numeric input did not parse.
    #[error("Invalid value for {input}: '{value}' is not a non-negative integer")]
    InvalidNumber {
        /// Input name.
        input: &'static str,
        /// Offending raw value.
        value: String,
    },

    /// The Linear API key was not supplied.
    #[error("Input required and not supplied: linear-api-key")]
    MissingApiKey,

    /// The `owner/repo` slug could not be determined.
    #[error(
        "Could not determine the repository. Set GITHUB_REPOSITORY to 'owner/repo' \
         or add a GitHub 'origin' remote"
    )]
    UnknownRepository,
}

/// Raw inputs before validation, one field per workflow input.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    /// `linear-api-key`
    pub linear_api_key: Option<String>,
    /// `team-keys`, comma-separated
    pub team_keys: Option<String>,
    /// `output-file`
    pub output_file: Option<String>,
    /// `workspace-slug`
    pub workspace_slug: Option<String>,
    /// Changeset selector inputs.
    pub changeset: ChangesetInputs,
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// Linear API key. Never logged.
    pub linear_api_key: String,
    /// Upper-cased team keys to restrict scanning to; `None` means all teams.
    pub team_keys: Option<Vec<String>>,
    /// Where the JSON artifact is written.
    pub output_file: PathBuf,
    /// Linear workspace slug used in issue URLs; may be empty.
    pub workspace_slug: String,
    /// The commit selector.
    pub changeset: Changeset,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Splits a comma-separated team key list, upper-casing each key.
///
/// Returns `None` when no key remains.
pub fn parse_team_keys(raw: &str) -> Option<Vec<String>> {
    let keys: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_uppercase)
        .collect();

    (!keys.is_empty()).then_some(keys)
}

impl ActionInputs {
    /// Validates raw inputs.
    pub fn parse(raw: RawInputs) -> Result<Self, ConfigError> {
        let linear_api_key = non_blank(raw.linear_api_key).ok_or(ConfigError::MissingApiKey)?;
        let changeset = raw.changeset.validate()?;
        let team_keys = non_blank(raw.team_keys).and_then(|keys| parse_team_keys(&keys));
        let output_file = non_blank(raw.output_file)
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE), PathBuf::from);
        let workspace_slug = non_blank(raw.workspace_slug).unwrap_or_default();

        Ok(Self {
            linear_api_key,
            team_keys,
            output_file,
            workspace_slug,
            changeset,
        })
    }
}
