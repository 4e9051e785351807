//! Resolves a changeset into the commits it selects.

use tracing::{debug, info};

use super::commit::Commit;
use super::error::GitError;
use super::history::HistoryProvider;
use crate::changeset::Changeset;

/// Separates options from revisions, so a value starting with `-` is never
/// read as a git option.
pub const END_OF_OPTIONS: &str = "--end-of-options";

/// Returns the `git log` arguments selecting `(start, end]`.
fn range(start: &str, end: &str) -> Vec<String> {
    vec![END_OF_OPTIONS.to_string(), format!("{start}..{end}")]
}

/// Fetches the commits selected by `changeset`, in history order.
///
/// Any failed query aborts the fetch. For `commits-shas`, a sha that
/// resolves to no commit is skipped. A `releases-count` of 0 counts as 1.
pub fn fetch_commits<H: HistoryProvider + ?Sized>(
    history: &H,
    changeset: &Changeset,
) -> Result<Vec<Commit>, GitError> {
    debug!(changeset = %changeset, "Resolving changeset");

    match changeset {
        Changeset::CommitsCount { commits_count } => {
            history.log(&["-n".to_string(), commits_count.to_string()])
        }
        Changeset::CommitsSinceSha { commits_since_sha } => {
            history.log(&range(commits_since_sha, "HEAD"))
        }
        Changeset::CommitsShas { commits_shas } => {
            let mut commits = Vec::with_capacity(commits_shas.len());
            for sha in commits_shas {
                let args = [
                    "-n".to_string(),
                    "1".to_string(),
                    END_OF_OPTIONS.to_string(),
                    sha.clone(),
                ];
                match history.log(&args)?.into_iter().next() {
                    Some(commit) => commits.push(commit),
                    None => debug!(%sha, "Commit did not resolve, skipping"),
                }
            }
            Ok(commits)
        }
        Changeset::CommitsRange {
            commits_start_sha,
            commits_end_sha,
            include_start_commit,
        } => {
            let start = if *include_start_commit {
                format!("{commits_start_sha}^")
            } else {
                commits_start_sha.clone()
            };
            history.log(&range(&start, commits_end_sha))
        }
        Changeset::TimeRange {
            time_range_start,
            time_range_end,
        } => history.log(&[
            format!("--since={time_range_start}"),
            format!("--until={time_range_end}"),
        ]),
        Changeset::ReleasesCount { releases_count } => {
            let tags = history.release_tags()?;
            let take = usize::try_from((*releases_count).max(1)).unwrap_or(usize::MAX);
            // Oldest of the N most recent releases: everything since N releases ago.
            let Some(boundary) = tags.iter().take(take).last() else {
                info!("No release tags found");
                return Ok(Vec::new());
            };
            debug!(tag = %boundary, "Using release tag as range start");
            history.log(&range(boundary, "HEAD"))
        }
        Changeset::TagsRange {
            tags_start,
            tags_end,
        } => history.log(&range(tags_start, tags_end)),
    }
}
