//! # linear-scan
//!
//! Finds Linear issue references in a selected set of git commits and
//! writes a JSON report, for use as a CI pipeline step.
//!
//! ## Pipeline
//!
//! 1. A [`Changeset`](changeset::Changeset) selects commits.
//! 2. [`fetch_commits`](git::fetch_commits) resolves it through a
//!    [`HistoryProvider`](git::HistoryProvider).
//! 3. [`scan_commits_for_issues`](scanner::scan_commits_for_issues) extracts
//!    issue keys for the workspace's team prefixes.
//! 4. The [`output`] module writes the report and step outputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use linear_scan::git::Commit;
//! use linear_scan::scanner::scan_commits_for_issues;
//!
//! let commits = vec![Commit::new("abc123", "feat: implement ENG-123 and ENG-456")];
//! let issues = scan_commits_for_issues(&commits, &["ENG"]).unwrap();
//! assert_eq!(issues.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod changeset;
pub mod cli;
pub mod config;
pub mod git;
pub mod linear;
pub mod output;
pub mod pipeline;
pub mod scanner;

pub use crate::cli::Cli;

/// The current version of linear-scan.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
