//! Tag-line bucketing
//!
//! A commit body line starting with a tag token places the commit in that
//! tag's bucket:
//!
//! ```text
//! Add conv3d kernels (#1234)
//!
//! FEATURE: conv3d for the WebGL backend
//! PERF
//! ```
//!
//! The rest of the line becomes the bullet text, or the subject when the line
//! holds only the tag. A commit carrying the skip tag is left out, and a
//! commit without tags goes to the fallback bucket.

use regex::Regex;

use notedraft_core::config::BucketsConfig;
use notedraft_core::{NotedraftError, Result};
use notedraft_git::Commit;

use super::{BucketPolicy, Placement};

/// Buckets commits by tag tokens at the start of body lines
pub struct TagLinePolicy {
    pattern: Regex,
    titles: Vec<(String, String)>,
    skip_tag: Option<String>,
    fallback_title: String,
}

impl TagLinePolicy {
    /// Build the policy from configuration
    pub fn new(config: &BucketsConfig) -> Result<Self> {
        let mut tokens: Vec<String> = config.tags.iter().map(|t| t.tag.clone()).collect();
        if let Some(skip) = &config.skip_tag {
            tokens.push(skip.clone());
        }
        // Longest first so that a tag never shadows a longer tag sharing its prefix
        tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t.trim()))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(
            r"^(?P<tag>{})(?:\s*:\s*|\s+|$)(?P<text>.*)$",
            alternation
        ))
        .map_err(|e| NotedraftError::other(format!("Invalid bucket tags: {}", e)))?;

        Ok(Self {
            pattern,
            titles: config
                .tags
                .iter()
                .map(|t| (t.tag.trim().to_string(), t.title.clone()))
                .collect(),
            skip_tag: config.skip_tag.as_ref().map(|s| s.trim().to_string()),
            fallback_title: config.fallback_title.clone(),
        })
    }

    fn title_for(&self, tag: &str) -> Option<&str> {
        self.titles
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, title)| title.as_str())
    }
}

impl BucketPolicy for TagLinePolicy {
    fn classify(&self, commit: &Commit) -> Vec<Placement> {
        let mut placements = Vec::new();

        for line in commit.body.lines() {
            let Some(caps) = self.pattern.captures(line.trim()) else {
                continue;
            };
            let tag = &caps["tag"];

            if self.skip_tag.as_deref() == Some(tag) {
                return Vec::new();
            }

            if let Some(title) = self.title_for(tag) {
                let text = caps["text"].trim();
                let text = if text.is_empty() {
                    commit.subject.as_str()
                } else {
                    text
                };
                placements.push(Placement::new(title, text));
            }
        }

        if placements.is_empty() {
            placements.push(Placement::new(&self.fallback_title, &commit.subject));
        }
        placements
    }

    fn bucket_order(&self) -> Vec<String> {
        let mut order: Vec<String> = self.titles.iter().map(|(_, title)| title.clone()).collect();
        order.push(self.fallback_title.clone());
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notedraft_core::config::BucketTag;

    fn policy() -> TagLinePolicy {
        TagLinePolicy::new(&BucketsConfig::default()).unwrap()
    }

    fn commit(subject: &str, body: &str) -> Commit {
        Commit::new(subject, body, "dev@example.com", "abc1234567890")
    }

    #[test]
    fn test_tag_with_text() {
        let policy = policy();
        let placements = policy.classify(&commit("Add conv3d (#12)", "FEATURE: conv3d on WebGL"));
        assert_eq!(placements, vec![Placement::new("Features", "conv3d on WebGL")]);
    }

    #[test]
    fn test_bare_tag_uses_subject() {
        let policy = policy();
        let placements = policy.classify(&commit("Fix memory leak in dispose", "Some context.\n\nBUG"));
        assert_eq!(
            placements,
            vec![Placement::new("Bug Fixes", "Fix memory leak in dispose")]
        );
    }

    #[test]
    fn test_multiple_tags() {
        let policy = policy();
        let placements = policy.classify(&commit(
            "Rewrite matMul",
            "FEATURE add batched matMul\nPERF: 2x faster on mobile",
        ));
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0], Placement::new("Features", "add batched matMul"));
        assert_eq!(placements[1], Placement::new("Performance", "2x faster on mobile"));
    }

    #[test]
    fn test_skip_tag_excludes_commit() {
        let policy = policy();
        let placements = policy.classify(&commit("Tweak CI", "DEV: faster builds\nINTERNAL"));
        assert!(placements.is_empty());
    }

    #[test]
    fn test_untagged_goes_to_fallback() {
        let policy = policy();
        let placements = policy.classify(&commit("Update README", ""));
        assert_eq!(placements, vec![Placement::new("Misc", "Update README")]);
    }

    #[test]
    fn test_tag_must_be_whole_word() {
        let policy = policy();
        let placements = policy.classify(&commit("Fix typo", "BUGFIX for the docs\nDOCS"));
        assert_eq!(placements, vec![Placement::new("Misc", "Fix typo")]);
    }

    #[test]
    fn test_custom_tags() {
        let config = BucketsConfig {
            tags: vec![BucketTag {
                tag: "API".to_string(),
                title: "API Changes".to_string(),
            }],
            skip_tag: None,
            fallback_title: "Other".to_string(),
        };
        let policy = TagLinePolicy::new(&config).unwrap();
        let placements = policy.classify(&commit("Add tf.unique", "API: tf.unique\nINTERNAL"));
        assert_eq!(placements, vec![Placement::new("API Changes", "tf.unique")]);
        assert_eq!(policy.bucket_order(), vec!["API Changes", "Other"]);
    }

    #[test]
    fn test_bucket_order_ends_with_fallback() {
        let policy = policy();
        let order = policy.bucket_order();
        assert_eq!(order.first().map(String::as_str), Some("Breaking Changes"));
        assert_eq!(order.last().map(String::as_str), Some("Misc"));
    }
}
