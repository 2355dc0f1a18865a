//! Formatted log queries
//!
//! Each commit is printed as subject, body, author email and hash separated by
//! the ASCII unit separator (`0x1f`), and terminated by the ASCII record
//! separator (`0x1e`). Neither byte occurs in ordinary commit text, so the
//! output splits back into records without ambiguity.

use std::fmt;

use tracing::{debug, instrument};

use crate::cli::run_git;
use crate::repository::{GitRepo, Result};
use crate::types::Commit;
use notedraft_core::error::GitError;

/// Field separator in log output
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Record terminator in log output
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// `--format` string: subject, body, author email, hash
pub const LOG_FORMAT: &str = "%s%x1f%b%x1f%ae%x1f%H%x1e";

const FIELD_COUNT: usize = 4;

/// A commit range to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRange {
    /// Both ends are tags
    TagToTag { start: String, end: String },
    /// Start is a root commit standing in for a missing tag
    CommitToTag { start: String, end: String },
}

impl LogRange {
    /// Revision range argument for `git log`
    pub fn revspec(&self) -> String {
        match self {
            Self::TagToTag { start, end } => format!("refs/tags/{}..refs/tags/{}", start, end),
            Self::CommitToTag { start, end } => format!("{}..refs/tags/{}", start, end),
        }
    }
}

impl fmt::Display for LogRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagToTag { start, end } => write!(f, "{}..{}", start, end),
            Self::CommitToTag { start, end } => write!(f, "{}..{}", start, end),
        }
    }
}

/// Split formatted log output into commits, preserving log order.
///
/// Yields exactly one commit per record separator.
pub fn parse_log(output: &str) -> Result<Vec<Commit>> {
    let mut records: Vec<&str> = output.split(RECORD_SEPARATOR).collect();
    // Whatever follows the final separator is the trailing newline, not a record
    let tail = records.pop().unwrap_or_default();
    if !tail.trim().is_empty() {
        return Err(GitError::LogParse(format!(
            "unterminated record: {:?}",
            tail.trim()
        )));
    }

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            // git separates entries with a newline that lands before the next subject
            let record = record.strip_prefix('\n').unwrap_or(record);
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            if fields.len() != FIELD_COUNT {
                return Err(GitError::LogParse(format!(
                    "record {} has {} fields, expected {}",
                    i,
                    fields.len(),
                    FIELD_COUNT
                )));
            }

            Ok(Commit::new(
                fields[0].trim(),
                fields[1].trim_end(),
                fields[2].trim(),
                fields[3].trim(),
            ))
        })
        .collect()
}

impl GitRepo {
    /// Commits in `range`, newest first
    #[instrument(skip(self), fields(repo = %self.label(), range = %range))]
    pub fn log(&self, range: &LogRange) -> Result<Vec<Commit>> {
        let revspec = range.revspec();
        let format = format!("--format={}", LOG_FORMAT);
        let output = run_git(self.path(), &["log", &format, &revspec, "--"])?;

        let commits = parse_log(&output)?;
        debug!(count = commits.len(), "extracted commits");
        Ok(commits)
    }
}
