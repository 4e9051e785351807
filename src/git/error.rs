//! Git history query errors.

use thiserror::Error;

/// Errors raised while querying version-control history.
#[derive(Error, Debug)]
pub enum GitError {
    /// The git process ran but exited with a non-zero status.
    #[error("Git error: {0}")]
    CommandFailed(String),

    /// The git process could not be started at all.
    #[error("Git error: failed to execute git: {0}")]
    Spawn(#[from] std::io::Error),
}
