//! Changeset selectors: which commits a run looks at.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ConfigError;

/// Revision used when a range has no explicit end.
pub const HEAD: &str = "HEAD";

fn head() -> String {
    HEAD.to_string()
}

fn default_releases_count() -> u32 {
    1
}

/// Declarative commit selector.
///
/// Serialises with a `type` discriminant and camelCase fields, e.g.
/// `{"type": "commits-count", "commitsCount": 10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Changeset {
    /// Everything since the Nth most recently created release tag.
    ReleasesCount {
        /// How many releases back to go.
        #[serde(default = "default_releases_count")]
        releases_count: u32,
    },
    /// Commits dated within `[start, end]`.
    TimeRange {
        /// ISO-8601 lower bound.
        time_range_start: String,
        /// ISO-8601 upper bound.
        time_range_end: String,
    },
    /// The most recent N commits reachable from HEAD.
    CommitsCount {
        /// Number of commits.
        commits_count: u32,
    },
    /// Commits in `(sha, HEAD]`.
    CommitsSinceSha {
        /// Exclusive lower bound.
        commits_since_sha: String,
    },
    /// Exactly the named commits, in the given order.
    CommitsShas {
        /// Commit identifiers to resolve one by one.
        commits_shas: Vec<String>,
    },
    /// Commits in `(start, end]`, or `[start, end]` with `include_start_commit`.
    CommitsRange {
        /// Range start.
        commits_start_sha: String,
        /// Range end, HEAD by default.
        #[serde(default = "head")]
        commits_end_sha: String,
        /// Whether the start commit itself is selected.
        #[serde(default)]
        include_start_commit: bool,
    },
    /// Commits in `(tags_start, tags_end]`.
    TagsRange {
        /// Exclusive lower bound tag.
        tags_start: String,
        /// Upper bound, HEAD by default.
        #[serde(default = "head")]
        tags_end: String,
    },
}

impl Changeset {
    /// Returns the selector's `type` discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReleasesCount { .. } => "releases-count",
            Self::TimeRange { .. } => "time-range",
            Self::CommitsCount { .. } => "commits-count",
            Self::CommitsSinceSha { .. } => "commits-since-sha",
            Self::CommitsShas { .. } => "commits-shas",
            Self::CommitsRange { .. } => "commits-range",
            Self::TagsRange { .. } => "tags-range",
        }
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReleasesCount { releases_count } => {
                write!(f, "commits since {releases_count} release(s) ago")
            }
            Self::TimeRange {
                time_range_start,
                time_range_end,
            } => write!(f, "commits between {time_range_start} and {time_range_end}"),
            Self::CommitsCount { commits_count } => write!(f, "last {commits_count} commit(s)"),
            Self::CommitsSinceSha { commits_since_sha } => {
                write!(f, "commits since {commits_since_sha}")
            }
            Self::CommitsShas { commits_shas } => write!(f, "{} named commit(s)", commits_shas.len()),
            Self::CommitsRange {
                commits_start_sha,
                commits_end_sha,
                include_start_commit,
            } => {
                let open = if *include_start_commit { '[' } else { '(' };
                write!(f, "commits in {open}{commits_start_sha}, {commits_end_sha}]")
            }
            Self::TagsRange {
                tags_start,
                tags_end,
            } => write!(f, "commits in ({tags_start}, {tags_end}]"),
        }
    }
}

/// Raw, untyped changeset inputs as they arrive from the workflow.
///
/// Blank strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ChangesetInputs {
    /// `releases-count`
    pub releases_count: Option<String>,
    /// `time-range-start`
    pub time_range_start: Option<String>,
    /// `time-range-end`
    pub time_range_end: Option<String>,
    /// `commits-count`
    pub commits_count: Option<String>,
    /// `commits-since-sha`
    pub commits_since_sha: Option<String>,
    /// `commits-shas`, comma-separated
    pub commits_shas: Option<String>,
    /// `commits-start-sha`
    pub commits_start_sha: Option<String>,
    /// `commits-end-sha`
    pub commits_end_sha: Option<String>,
    /// `include-start-commit`
    pub include_start_commit: Option<String>,
    /// `tags-start`
    pub tags_start: Option<String>,
    /// `tags-end`
    pub tags_end: Option<String>,
}

/// Selector groups in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    ReleasesCount,
    TimeRange,
    CommitsCount,
    CommitsSinceSha,
    CommitsShas,
    CommitsRange,
    TagsRange,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_count(input: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            input,
            value: value.to_string(),
        })
}

impl ChangesetInputs {
    /// Returns the groups that have their defining input(s) present.
    fn specified_groups(&self) -> Vec<Group> {
        let time_start = present(self.time_range_start.as_ref());
        let time_end = present(self.time_range_end.as_ref());
        if time_start.is_some() != time_end.is_some() {
            warn!("time-range-start and time-range-end must be given together; ignoring the lone bound");
        }

        [
            (Group::ReleasesCount, present(self.releases_count.as_ref()).is_some()),
            (Group::TimeRange, time_start.is_some() && time_end.is_some()),
            (Group::CommitsCount, present(self.commits_count.as_ref()).is_some()),
            (Group::CommitsSinceSha, present(self.commits_since_sha.as_ref()).is_some()),
            (Group::CommitsShas, present(self.commits_shas.as_ref()).is_some()),
            (Group::CommitsRange, present(self.commits_start_sha.as_ref()).is_some()),
            (Group::TagsRange, present(self.tags_start.as_ref()).is_some()),
        ]
        .into_iter()
        .filter_map(|(group, specified)| specified.then_some(group))
        .collect()
    }

    /// Validates that exactly one selector group is present and builds it.
    pub fn validate(&self) -> Result<Changeset, ConfigError> {
        let groups = self.specified_groups();
        let group = match groups.as_slice() {
            [] => return Err(ConfigError::NoChangeset),
            [group] => *group,
            _ => return Err(ConfigError::MultipleChangesets),
        };

        // Each arm below only runs when its defining input is present.
        let required = |value: Option<&String>| present(value).unwrap_or_default().to_string();

        let changeset = match group {
            Group::ReleasesCount => Changeset::ReleasesCount {
                releases_count: parse_count("releases-count", &required(self.releases_count.as_ref()))?,
            },
            Group::TimeRange => Changeset::TimeRange {
                time_range_start: required(self.time_range_start.as_ref()),
                time_range_end: required(self.time_range_end.as_ref()),
            },
            Group::CommitsCount => Changeset::CommitsCount {
                commits_count: parse_count("commits-count", &required(self.commits_count.as_ref()))?,
            },
            Group::CommitsSinceSha => Changeset::CommitsSinceSha {
                commits_since_sha: required(self.commits_since_sha.as_ref()),
            },
            Group::CommitsShas => Changeset::CommitsShas {
                commits_shas: required(self.commits_shas.as_ref())
                    .split(',')
                    .map(str::trim)
                    .filter(|sha| !sha.is_empty())
                    .map(String::from)
                    .collect(),
            },
            Group::CommitsRange => Changeset::CommitsRange {
                commits_start_sha: required(self.commits_start_sha.as_ref()),
                commits_end_sha: present(self.commits_end_sha.as_ref())
                    .map_or_else(head, String::from),
                include_start_commit: present(self.include_start_commit.as_ref())
                    .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            },
            Group::TagsRange => Changeset::TagsRange {
                tags_start: required(self.tags_start.as_ref()),
                tags_end: present(self.tags_end.as_ref()).map_or_else(head, String::from),
            },
        };

        Ok(changeset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn no_selector_is_rejected() {
        let err = ChangesetInputs::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoChangeset));
        let message = err.to_string();
        assert!(message.contains("No changeset specification provided"));
        for name in ["releases-count", "commits-count", "commits-since-sha", "commits-shas", "tags-start"] {
            assert!(message.contains(name), "missing {name} in {message}");
        }
    }

    #[test]
    fn blank_inputs_count_as_absent() {
        let inputs = ChangesetInputs {
            commits_count: some("  "),
            tags_start: some(""),
            ..Default::default()
        };
        assert!(matches!(inputs.validate(), Err(ConfigError::NoChangeset)));
    }

    #[test]
    fn two_selectors_are_rejected() {
        let inputs = ChangesetInputs {
            commits_count: some("10"),
            releases_count: some("5"),
            ..Default::default()
        };
        let err = inputs.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MultipleChangesets));
        assert!(err.to_string().contains("Multiple changeset types specified"));
    }

    #[test]
    fn time_range_counts_as_one_group() {
        let inputs = ChangesetInputs {
            time_range_start: some("2024-01-01T00:00:00Z"),
            time_range_end: some("2024-12-31T23:59:59Z"),
            commits_count: some("3"),
            ..Default::default()
        };
        assert!(matches!(inputs.validate(), Err(ConfigError::MultipleChangesets)));
    }

    #[test]
    fn lone_time_bound_is_not_a_group() {
        let inputs = ChangesetInputs {
            time_range_start: some("2024-01-01T00:00:00Z"),
            ..Default::default()
        };
        assert!(matches!(inputs.validate(), Err(ConfigError::NoChangeset)));
    }

    #[test]
    fn commits_count() {
        let inputs = ChangesetInputs {
            commits_count: some("10"),
            ..Default::default()
        };
        assert_eq!(inputs.validate().unwrap(), Changeset::CommitsCount { commits_count: 10 });
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let inputs = ChangesetInputs {
            releases_count: some("three"),
            ..Default::default()
        };
        let err = inputs.validate().unwrap_err();
        assert!(err.to_string().contains("releases-count"));
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn time_range() {
        let inputs = ChangesetInputs {
            time_range_start: some("2024-01-01T00:00:00Z"),
            time_range_end: some("2024-12-31T23:59:59Z"),
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap(),
            Changeset::TimeRange {
                time_range_start: "2024-01-01T00:00:00Z".to_string(),
                time_range_end: "2024-12-31T23:59:59Z".to_string(),
            }
        );
    }

    #[test]
    fn commits_shas_are_split_and_trimmed() {
        let inputs = ChangesetInputs {
            commits_shas: some("abc123, def456,ghi789 ,"),
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap(),
            Changeset::CommitsShas {
                commits_shas: vec!["abc123".into(), "def456".into(), "ghi789".into()],
            }
        );
    }

    #[test]
    fn commits_range_defaults() {
        let inputs = ChangesetInputs {
            commits_start_sha: some("abc123"),
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap(),
            Changeset::CommitsRange {
                commits_start_sha: "abc123".to_string(),
                commits_end_sha: "HEAD".to_string(),
                include_start_commit: false,
            }
        );
    }

    #[test]
    fn commits_range_with_inclusive_start() {
        let inputs = ChangesetInputs {
            commits_start_sha: some("abc123"),
            commits_end_sha: some("def456"),
            include_start_commit: some("TRUE"),
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap(),
            Changeset::CommitsRange {
                commits_start_sha: "abc123".to_string(),
                commits_end_sha: "def456".to_string(),
                include_start_commit: true,
            }
        );
    }

    #[test]
    fn range_end_alone_is_not_a_group() {
        let inputs = ChangesetInputs {
            commits_end_sha: some("def456"),
            tags_end: some("v2.0.0"),
            ..Default::default()
        };
        assert!(matches!(inputs.validate(), Err(ConfigError::NoChangeset)));
    }

    #[test]
    fn tags_range_defaults_to_head() {
        let inputs = ChangesetInputs {
            tags_start: some("v1.0.0"),
            ..Default::default()
        };
        assert_eq!(
            inputs.validate().unwrap(),
            Changeset::TagsRange {
                tags_start: "v1.0.0".to_string(),
                tags_end: "HEAD".to_string(),
            }
        );
    }

    #[test]
    fn serialises_with_type_tag_and_camel_case() -> anyhow::Result<()> {
        let value = serde_json::to_value(Changeset::CommitsRange {
            commits_start_sha: "a".to_string(),
            commits_end_sha: "HEAD".to_string(),
            include_start_commit: true,
        })?;
        assert_eq!(
            value,
            serde_json::json!({
                "type": "commits-range",
                "commitsStartSha": "a",
                "commitsEndSha": "HEAD",
                "includeStartCommit": true
            })
        );
        Ok(())
    }

    #[test]
    fn deserialising_applies_defaults() -> anyhow::Result<()> {
        let changeset: Changeset = serde_json::from_str(r#"{"type": "releases-count"}"#)?;
        assert_eq!(changeset, Changeset::ReleasesCount { releases_count: 1 });
        Ok(())
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = serde_json::from_str::<Changeset>(r#"{"type": "branches"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn kind_matches_serialised_tag() -> anyhow::Result<()> {
        let changeset = Changeset::TagsRange {
            tags_start: "v1".to_string(),
            tags_end: "HEAD".to_string(),
        };
        let value = serde_json::to_value(&changeset)?;
        assert_eq!(value["type"], changeset.kind());
        Ok(())
    }
}
