//! Shared test utilities for the `git` module.

use std::cell::RefCell;
use std::collections::HashMap;

use super::commit::Commit;
use super::error::GitError;
use super::history::HistoryProvider;

/// In-memory history provider with canned answers.
///
/// `git log` argument lists are matched exactly against the programmed
/// responses; unprogrammed queries return no commits. Every query is
/// recorded so tests can check what would have been run.
#[derive(Default)]
pub(crate) struct FakeHistory {
    logs: HashMap<Vec<String>, Result<Vec<Commit>, String>>,
    tags: Vec<String>,
    recorded: RefCell<Vec<Vec<String>>>,
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

impl FakeHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers `git log <args>` with `commits` (given as `(sha, message)`).
    pub(crate) fn with_log(mut self, args: &[&str], commits: &[(&str, &str)]) -> Self {
        let commits = commits
            .iter()
            .map(|(sha, message)| Commit::new(*sha, *message))
            .collect();
        self.logs.insert(to_args(args), Ok(commits));
        self
    }

    /// Makes `git log <args>` fail with `stderr`.
    pub(crate) fn with_failing_log(mut self, args: &[&str], stderr: &str) -> Self {
        self.logs.insert(to_args(args), Err(stderr.to_string()));
        self
    }

    /// Sets the release tags, most recent first.
    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    /// Returns every `git log` argument list issued so far.
    pub(crate) fn queries(&self) -> Vec<Vec<String>> {
        self.recorded.borrow().clone()
    }
}

impl HistoryProvider for FakeHistory {
    fn log(&self, log_args: &[String]) -> Result<Vec<Commit>, GitError> {
        self.recorded.borrow_mut().push(log_args.to_vec());
        match self.logs.get(log_args) {
            Some(Ok(commits)) => Ok(commits.clone()),
            Some(Err(stderr)) => Err(GitError::CommandFailed(stderr.clone())),
            None => Ok(Vec::new()),
        }
    }

    fn release_tags(&self) -> Result<Vec<String>, GitError> {
        Ok(self.tags.clone())
    }
}
