//! Release notes types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use notedraft_core::config::RepoConfig;
use notedraft_core::error::{Result, VersionError};
use notedraft_core::format_tag;
use notedraft_git::{Commit, LogRange};

/// A repository whose version range is resolved step by step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Display name
    pub name: String,
    /// `owner/name` slug
    pub identifier: String,
    /// Version the range starts after; `None` when previously untagged
    pub start_version: Option<String>,
    /// Version the range ends at
    pub end_version: Option<String>,
    /// Commit the range starts after
    pub start_commit: Option<String>,
}

impl Repo {
    /// Create an unresolved record
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            start_version: None,
            end_version: None,
            start_commit: None,
        }
    }

    /// Unresolved record for a configured repository
    pub fn from_config(config: &RepoConfig) -> Self {
        Self::new(&config.name, &config.identifier)
    }

    /// The configured identity of this repository
    pub fn config(&self) -> RepoConfig {
        RepoConfig {
            name: self.name.clone(),
            identifier: self.identifier.clone(),
        }
    }

    /// Range to log: tag to tag, or root commit to tag when untagged before.
    pub fn log_range(&self, tag_format: &str) -> Result<LogRange> {
        let end = self
            .end_version
            .as_deref()
            .ok_or_else(|| VersionError::Unresolved(self.name.clone()))?;
        let end = format_tag(tag_format, end);

        match (&self.start_version, &self.start_commit) {
            (Some(start), _) => Ok(LogRange::TagToTag {
                start: format_tag(tag_format, start),
                end,
            }),
            (None, Some(commit)) => Ok(LogRange::CommitToTag {
                start: commit.clone(),
                end,
            }),
            (None, None) => Err(VersionError::Unresolved(self.name.clone()).into()),
        }
    }
}

/// The union package version range chosen by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    pub start: String,
    pub end: String,
}

impl VersionRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Commits extracted for one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCommits {
    /// Repository identity
    pub repo: RepoConfig,
    /// Start version; `None` when the range starts at the root commit
    pub start_version: Option<String>,
    /// End version
    pub end_version: String,
    /// Commit the range starts after
    pub start_commit: Option<String>,
    /// Commits in log order, newest first
    pub commits: Vec<Commit>,
}

impl RepoCommits {
    /// Check if the range has no commits
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A single bullet in the notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Text of the bullet
    pub text: String,
    /// Full commit hash
    pub sha: String,
    /// Author email
    pub author_email: String,
    /// Resolved username of the author
    pub username: Option<String>,
}

/// A titled group of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub title: String,
    pub entries: Vec<NoteEntry>,
}

impl Bucket {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bucketed notes for one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoNotes {
    pub repo: RepoConfig,
    /// Start label: version, or short root hash when untagged
    pub start: String,
    pub end: String,
    /// Non-empty buckets in configured order
    pub buckets: Vec<Bucket>,
}

/// The whole draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseNotes {
    /// Union display name
    pub union: String,
    pub range: VersionRange,
    /// Day the draft was generated
    pub date: NaiveDate,
    pub repos: Vec<RepoNotes>,
}
