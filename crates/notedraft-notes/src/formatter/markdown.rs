//! Markdown release notes formatter

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, instrument};

use notedraft_core::config::GitHubConfig;
use notedraft_git::short_hash;

use super::NotesFormatter;
use crate::types::{NoteEntry, ReleaseNotes, RepoNotes};

static PR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)").expect("valid regex"));

/// Markdown release notes formatter
pub struct MarkdownFormatter {
    /// Web URL for commit and pull request links
    pub web_url: String,
    /// Author email domains that get no thanks line
    pub skip_thanks_domains: Vec<String>,
}

impl MarkdownFormatter {
    /// Create a formatter linking to `web_url`
    pub fn new(web_url: impl Into<String>) -> Self {
        Self {
            web_url: web_url.into().trim_end_matches('/').to_string(),
            skip_thanks_domains: Vec::new(),
        }
    }

    /// Formatter configured from the code-review settings
    pub fn from_config(config: &GitHubConfig) -> Self {
        let mut formatter = Self::new(&config.web_url);
        formatter.skip_thanks_domains = config
            .skip_thanks_domains
            .iter()
            .map(|d| d.trim_start_matches('@').to_lowercase())
            .collect();
        formatter
    }

    fn thanks(&self, entry: &NoteEntry) -> Option<String> {
        let username = entry.username.as_ref()?;
        let domain = entry
            .author_email
            .rsplit_once('@')
            .map(|(_, d)| d.to_lowercase())
            .unwrap_or_default();
        if self.skip_thanks_domains.contains(&domain) {
            return None;
        }
        Some(format!(" Thanks, @{}.", username))
    }

    fn link_pull_requests(&self, text: &str, identifier: &str) -> String {
        PR_REF
            .replace_all(text, |caps: &Captures| {
                format!(
                    "([#{n}]({}/{}/pull/{n}))",
                    self.web_url,
                    identifier,
                    n = &caps[1]
                )
            })
            .into_owned()
    }

    fn format_entry(&self, entry: &NoteEntry, identifier: &str) -> String {
        let mut line = format!(
            "- {} ([{}]({}/{}/commit/{}))",
            self.link_pull_requests(&entry.text, identifier),
            short_hash(&entry.sha),
            self.web_url,
            identifier,
            entry.sha
        );
        if let Some(thanks) = self.thanks(entry) {
            line.push_str(&thanks);
        }
        line
    }

    fn format_repo(&self, repo: &RepoNotes, output: &mut String) {
        output.push_str(&format!(
            "## {} ({} → {})\n\n",
            repo.repo.name, repo.start, repo.end
        ));

        if repo.buckets.iter().all(|b| b.is_empty()) {
            output.push_str("_No changes._\n\n");
            return;
        }

        for bucket in repo.buckets.iter().filter(|b| !b.is_empty()) {
            output.push_str(&format!("### {}\n\n", bucket.title));
            for entry in &bucket.entries {
                output.push_str(&self.format_entry(entry, &repo.repo.identifier));
                output.push('\n');
            }
            output.push('\n');
        }
    }
}

impl NotesFormatter for MarkdownFormatter {
    #[instrument(skip(self, notes), fields(repo_count = notes.repos.len()))]
    fn format(&self, notes: &ReleaseNotes) -> String {
        let mut output = format!(
            "# {} {} → {}\n\n_Drafted {}._\n\n",
            notes.union,
            notes.range.start,
            notes.range.end,
            notes.date.format("%Y-%m-%d")
        );

        for repo in &notes.repos {
            self.format_repo(repo, &mut output);
        }

        let output = format!("{}\n", output.trim_end());
        debug!(output_len = output.len(), "markdown notes formatted");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bucket, VersionRange};
    use chrono::NaiveDate;
    use notedraft_core::config::RepoConfig;

    fn entry(text: &str, email: &str, username: Option<&str>) -> NoteEntry {
        NoteEntry {
            text: text.to_string(),
            sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
            author_email: email.to_string(),
            username: username.map(String::from),
        }
    }

    fn notes(buckets: Vec<Bucket>) -> ReleaseNotes {
        ReleaseNotes {
            union: "Union".to_string(),
            range: VersionRange::new("1.0.0", "1.1.0"),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            repos: vec![RepoNotes {
                repo: RepoConfig {
                    name: "Core".to_string(),
                    identifier: "acme/core".to_string(),
                },
                start: "1.0.0".to_string(),
                end: "1.1.0".to_string(),
                buckets,
            }],
        }
    }

    #[test]
    fn test_format_layout() {
        let mut features = Bucket::new("Features");
        features
            .entries
            .push(entry("Add conv3d (#12)", "alice@example.com", Some("alice")));
        let output = MarkdownFormatter::new("https://github.com").format(&notes(vec![features]));

        assert!(output.starts_with("# Union 1.0.0 → 1.1.0\n\n_Drafted 2024-03-01._\n"));
        assert!(output.contains("## Core (1.0.0 → 1.1.0)\n\n### Features\n\n"));
        assert!(output.contains(
            "- Add conv3d ([#12](https://github.com/acme/core/pull/12)) \
             ([0123456](https://github.com/acme/core/commit/0123456789abcdef0123456789abcdef01234567)) \
             Thanks, @alice.\n"
        ));
    }

    #[test]
    fn test_empty_repo() {
        let output = MarkdownFormatter::new("https://github.com")
            .format(&notes(vec![Bucket::new("Features")]));
        assert!(output.contains("## Core (1.0.0 → 1.1.0)\n\n_No changes._"));
        assert!(!output.contains("### Features"));
    }

    #[test]
    fn test_skip_thanks_domain() {
        let mut formatter = MarkdownFormatter::new("https://github.com");
        formatter.skip_thanks_domains = vec!["google.com".to_string()];

        let mut misc = Bucket::new("Misc");
        misc.entries
            .push(entry("Internal cleanup", "dev@google.com", Some("dev")));
        misc.entries.push(entry("Fix docs", "someone@example.com", None));
        let output = formatter.format(&notes(vec![misc]));

        assert!(!output.contains("Thanks"));
        assert!(output.contains("- Fix docs ([0123456]"));
    }

    #[test]
    fn test_from_config_normalizes_domains() {
        let config = GitHubConfig {
            skip_thanks_domains: vec!["@Google.com".to_string()],
            ..GitHubConfig::default()
        };
        let formatter = MarkdownFormatter::from_config(&config);
        assert_eq!(formatter.skip_thanks_domains, vec!["google.com"]);
        assert!(formatter
            .thanks(&entry("x", "dev@GOOGLE.com", Some("dev")))
            .is_none());
    }
}
