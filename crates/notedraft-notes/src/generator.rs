//! Release notes generation

use chrono::Utc;
use tracing::{info, instrument};

use notedraft_core::config::Config;
use notedraft_core::error::Result;
use notedraft_git::short_hash;

use crate::formatter::{MarkdownFormatter, NotesFormatter};
use crate::github::UserDirectory;
use crate::policy::{BucketPolicy, TagLinePolicy};
use crate::types::{Bucket, NoteEntry, ReleaseNotes, RepoCommits, RepoNotes, VersionRange};

/// Release notes generator
pub struct NotesGenerator {
    union: String,
    policy: Box<dyn BucketPolicy>,
    formatter: Box<dyn NotesFormatter>,
}

impl NotesGenerator {
    /// Create a generator with the configured policy and markdown output
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            union: config.union.name.clone(),
            policy: Box::new(TagLinePolicy::new(&config.buckets)?),
            formatter: Box::new(MarkdownFormatter::from_config(&config.github)),
        })
    }

    /// Replace the bucketing policy
    pub fn with_policy(mut self, policy: Box<dyn BucketPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: Box<dyn NotesFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Bucket every repository's commits and resolve author usernames
    #[instrument(skip(self, repos, users), fields(repo_count = repos.len()))]
    pub async fn generate(
        &self,
        range: &VersionRange,
        repos: &[RepoCommits],
        users: &dyn UserDirectory,
    ) -> Result<ReleaseNotes> {
        let mut notes = Vec::with_capacity(repos.len());
        for repo in repos {
            notes.push(self.bucket_repo(repo, users).await?);
        }

        Ok(ReleaseNotes {
            union: self.union.clone(),
            range: range.clone(),
            date: Utc::now().date_naive(),
            repos: notes,
        })
    }

    async fn bucket_repo(&self, repo: &RepoCommits, users: &dyn UserDirectory) -> Result<RepoNotes> {
        let mut buckets: Vec<Bucket> = self.policy.bucket_order().into_iter().map(Bucket::new).collect();

        for commit in &repo.commits {
            let placements = self.policy.classify(commit);
            if placements.is_empty() {
                continue;
            }
            let username = users.username_for_email(&commit.author_email).await?;

            for placement in placements {
                let entry = NoteEntry {
                    text: placement.text,
                    sha: commit.sha.clone(),
                    author_email: commit.author_email.clone(),
                    username: username.clone(),
                };
                match buckets.iter_mut().find(|b| b.title == placement.bucket) {
                    Some(bucket) => bucket.entries.push(entry),
                    None => {
                        let mut bucket = Bucket::new(placement.bucket);
                        bucket.entries.push(entry);
                        buckets.push(bucket);
                    }
                }
            }
        }
        buckets.retain(|b| !b.is_empty());

        let start = match (&repo.start_version, &repo.start_commit) {
            (Some(version), _) => version.clone(),
            (None, Some(commit)) => short_hash(commit).to_string(),
            (None, None) => String::new(),
        };

        info!(
            repo = %repo.repo.name,
            commits = repo.commits.len(),
            buckets = buckets.len(),
            "bucketed commits"
        );
        Ok(RepoNotes {
            repo: repo.repo.clone(),
            start,
            end: repo.end_version.clone(),
            buckets,
        })
    }

    /// Render notes with the configured formatter
    pub fn render(&self, notes: &ReleaseNotes) -> String {
        self.formatter.format(notes)
    }
}
