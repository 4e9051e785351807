//! Commit records and `git log` output parsing.

use serde::{Deserialize, Serialize};

/// Pretty format handed to `git log`: full hash and subject, each NUL-terminated.
///
/// A NUL byte can appear in neither a hash nor a single-line subject, so the
/// output splits unambiguously whatever the messages contain.
pub const LOG_FORMAT: &str = "%H%x00%s%x00";

/// Field and record delimiter emitted by [`LOG_FORMAT`].
const DELIMITER: char = '\0';

/// A single commit selected by a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash, full or abbreviated.
    pub sha: String,
    /// Subject line of the commit message, trimmed.
    pub message: String,
}

impl Commit {
    /// Creates a commit record.
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// Returns the hash abbreviated to [`SHORT_HASH_LEN`](super::SHORT_HASH_LEN) characters.
    pub fn short_sha(&self) -> &str {
        self.sha
            .get(..super::SHORT_HASH_LEN)
            .unwrap_or(&self.sha)
    }
}

/// Parses NUL-delimited `git log` output into commits.
///
/// Blank fragments are discarded before pairing, and an odd trailing
/// fragment without a message is dropped. Blank output yields no commits.
pub fn parse_log_output(output: &str) -> Vec<Commit> {
    if output.trim().is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = output
        .split(DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    parts
        .chunks_exact(2)
        .map(|pair| Commit::new(pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delimited_pairs() {
        let commits = parse_log_output("abc123\0feat: x\0def456\0fix: y\0");
        assert_eq!(
            commits,
            vec![Commit::new("abc123", "feat: x"), Commit::new("def456", "fix: y")]
        );
    }

    #[test]
    fn blank_output_is_empty() {
        assert!(parse_log_output("").is_empty());
        assert!(parse_log_output("  \n\t ").is_empty());
    }

    #[test]
    fn newline_separated_records_are_trimmed() {
        // git terminates each formatted record with a newline after the last NUL.
        let commits = parse_log_output("abc123\0feat: x\0\ndef456\0fix: y\0\n");
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].sha, "def456");
        assert_eq!(commits[1].message, "fix: y");
    }

    #[test]
    fn trailing_unpaired_fragment_is_dropped() {
        let commits = parse_log_output("abc123\0feat: x\0def456\0");
        assert_eq!(commits, vec![Commit::new("abc123", "feat: x")]);
    }

    #[test]
    fn short_sha_truncates_full_hashes_only() {
        let full = Commit::new("0123456789abcdef0123456789abcdef01234567", "x");
        assert_eq!(full.short_sha(), "01234567");
        assert_eq!(Commit::new("abc", "x").short_sha(), "abc");
    }

    #[test]
    fn message_content_is_kept_verbatim() {
        let commits = parse_log_output("abc123\0fix: handle a|b, \"quotes\" and ENG-1\0");
        assert_eq!(commits[0].message, "fix: handle a|b, \"quotes\" and ENG-1");
    }
}
