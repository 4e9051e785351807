//! Git history access: selecting commits for a changeset.

pub mod commit;
pub mod error;
pub mod fetch;
pub mod history;
pub mod remote;

#[cfg(test)]
pub(crate) mod test_utils;

pub use commit::{parse_log_output, Commit, LOG_FORMAT};
pub use error::GitError;
pub use fetch::fetch_commits;
pub use history::{GitCli, HistoryProvider, RELEASE_TAG_PATTERN};
pub use remote::{detect_repository, resolve_repository};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
