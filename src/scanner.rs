//! Issue key extraction from commit messages.
//!
//! An issue key is a team prefix, a hyphen and one or more digits
//! (`ENG-123`). ASCII letters in a prefix match in either case; keys are
//! reported upper-cased.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::git::Commit;

/// Pattern that can never match: no position is both a word boundary and not one.
const MATCH_NOTHING: &str = r"\b\B";

/// An issue key and the commits that mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedIssue {
    /// Upper-cased issue key, e.g. `ENG-123`.
    pub key: String,
    /// Shas of the commits referencing the key, in first-seen order.
    pub commits: Vec<String>,
}

/// Escapes `key` so that its ASCII letters match in either case.
///
/// Case folding stays ASCII-only: Unicode folding would let look-alikes such
/// as the Kelvin sign stand in for `K`.
fn ascii_case_insensitive(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                format!("[{}{}]", c.to_ascii_uppercase(), c.to_ascii_lowercase())
            } else {
                regex::escape(c.encode_utf8(&mut [0; 4]))
            }
        })
        .collect()
}

/// Builds the alternation source for `team_keys`.
fn pattern_source<S: AsRef<str>>(team_keys: &[S]) -> String {
    let alternation = team_keys
        .iter()
        .map(|key| ascii_case_insensitive(key.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?:{alternation})-[0-9]+")
}

/// Builds a case-insensitive pattern matching `<KEY>-<digits>` for any key.
///
/// With no keys the pattern matches nothing.
pub fn build_issue_pattern<S: AsRef<str>>(team_keys: &[S]) -> Result<Regex, regex::Error> {
    let source = if team_keys.is_empty() {
        MATCH_NOTHING.to_string()
    } else {
        pattern_source(team_keys)
    };

    Regex::new(&source)
}

/// Scans every commit message for issue keys.
///
/// Returns one entry per distinct key, sorted by key. Each entry lists the
/// referencing commits once each, in the order the commits were given.
pub fn scan_commits_for_issues<S: AsRef<str>>(
    commits: &[Commit],
    team_keys: &[S],
) -> Result<Vec<ScannedIssue>, regex::Error> {
    if team_keys.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = build_issue_pattern(team_keys)?;
    let mut issues: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for commit in commits {
        for found in pattern.find_iter(&commit.message) {
            let key = found.as_str().to_uppercase();
            let shas = issues.entry(key).or_default();
            if !shas.contains(&commit.sha) {
                shas.push(commit.sha.clone());
            }
        }
    }

    debug!(
        commits = commits.len(),
        issues = issues.len(),
        "Scanned commits for issue keys"
    );

    Ok(issues
        .into_iter()
        .map(|(key, commits)| ScannedIssue { key, commits })
        .collect())
}
