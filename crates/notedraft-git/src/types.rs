//! Git types

use serde::{Deserialize, Serialize};

/// A commit as recovered from formatted log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// First line of the message
    pub subject: String,
    /// Remainder of the message, possibly empty
    pub body: String,
    /// Author email
    pub author_email: String,
    /// Full commit hash
    pub sha: String,
}

impl Commit {
    /// Create a new Commit
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        author_email: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            author_email: author_email.into(),
            sha: sha.into(),
        }
    }

    /// Abbreviated hash (first 7 characters)
    pub fn short_sha(&self) -> &str {
        short_hash(&self.sha)
    }
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            message: None,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// First 7 characters of a hash
pub fn short_hash(hash: &str) -> &str {
    let end = hash
        .char_indices()
        .nth(7)
        .map(|(i, _)| i)
        .unwrap_or(hash.len());
    &hash[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha() {
        let commit = Commit::new("Add op", "", "dev@example.com", "abc1234567890");
        assert_eq!(commit.short_sha(), "abc1234");
    }

    #[test]
    fn test_short_hash_of_short_input() {
        assert_eq!(short_hash("abc"), "abc");
    }
}
