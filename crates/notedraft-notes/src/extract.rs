//! Commit extraction for resolved repositories

use tracing::{info, instrument};

use notedraft_core::error::{Result, VersionError};
use notedraft_git::GitRepo;

use crate::types::{Repo, RepoCommits};

/// Log the resolved range of `repo` and package the commits.
///
/// Fails when `repo` has no end version.
#[instrument(skip(repo, git), fields(repo = %repo.name))]
pub fn extract_commits(repo: &Repo, git: &GitRepo, tag_format: &str) -> Result<RepoCommits> {
    let end_version = repo
        .end_version
        .clone()
        .ok_or_else(|| VersionError::Unresolved(repo.name.clone()))?;
    let range = repo.log_range(tag_format)?;
    let commits = git.log(&range)?;
    info!(range = %range, count = commits.len(), "extracted commits");

    Ok(RepoCommits {
        repo: repo.config(),
        start_version: repo.start_version.clone(),
        end_version,
        start_commit: repo.start_commit.clone(),
        commits,
    })
}
