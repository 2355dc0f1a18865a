//! Scratch directory and clone operations

use std::path::Path;

use tracing::{info, instrument};

use crate::cli::run_git;
use crate::repository::{GitRepo, Result};
use notedraft_core::error::GitError;

/// Remove `dir` if present and recreate it empty
#[instrument(fields(dir = %dir.display()))]
pub fn prepare_scratch_dir(dir: &Path) -> Result<()> {
    let scratch_err = |e: std::io::Error| GitError::ScratchFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(scratch_err)?;
    }
    std::fs::create_dir_all(dir).map_err(scratch_err)?;

    info!(dir = %dir.display(), "prepared scratch directory");
    Ok(())
}

/// Clone `url` into `dest` using the git CLI and open the result.
///
/// The CLI handles credential helpers and SSH agents that git2 does not.
/// `dest` and a local `url` may be relative to the current directory.
#[instrument(fields(dest = %dest.display()))]
pub fn clone_repo(url: &str, dest: &Path) -> Result<GitRepo> {
    let start = std::time::Instant::now();
    let dest = std::path::absolute(dest).map_err(|e| GitError::ScratchFailed {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;
    let parent = dest.parent().unwrap_or_else(|| Path::new("/"));
    let dest_arg = dest.to_string_lossy();
    let source = local_source(url);

    run_git(parent, &["clone", "--quiet", &source, &dest_arg]).map_err(|e| match e {
        GitError::CommandFailed { stderr, .. } => GitError::CloneFailed {
            url: url.to_string(),
            reason: stderr,
        },
        other => other,
    })?;

    info!(
        url,
        duration_ms = start.elapsed().as_millis(),
        "cloned repository"
    );
    GitRepo::open(&dest)
}

/// A relative local path made absolute, since the clone runs elsewhere
fn local_source(url: &str) -> String {
    let path = Path::new(url);
    if url.contains("://") || path.is_absolute() || !path.exists() {
        return url.to_string();
    }
    std::path::absolute(path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_scratch_clears_contents() {
        let temp = TempDir::new().unwrap();
        let scratch = temp.path().join("scratch");
        std::fs::create_dir_all(scratch.join("stale")).unwrap();
        std::fs::write(scratch.join("stale").join("file"), "x").unwrap();

        prepare_scratch_dir(&scratch).unwrap();

        assert!(scratch.exists());
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn test_clone_local_repo_keeps_tags() {
        let fx = Fixture::new();
        let oid = fx.commit("a.txt", "1", "Initial commit", "a@example.com");
        fx.tag("v1.0.0", oid);

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("clone");
        let repo = clone_repo(&fx.path().to_string_lossy(), &dest).unwrap();

        assert!(repo.find_tag("v1.0.0").unwrap().is_some());
    }

    #[test]
    fn test_clone_into_relative_dest() {
        let fx = Fixture::new();
        let oid = fx.commit("a.txt", "1", "Initial commit", "a@example.com");
        fx.tag("v1.0.0", oid);

        // Relative to the crate directory the test runs in
        let temp = TempDir::new_in(".").unwrap();
        assert!(temp.path().is_relative());
        let dest = temp.path().join("scratch").join("acme__core");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();

        let repo = clone_repo(&fx.path().to_string_lossy(), &dest).unwrap();

        assert!(repo.find_tag("v1.0.0").unwrap().is_some());
        assert!(dest.join(".git").exists());
        assert!(!dest.parent().unwrap().join(&dest).exists());
    }

    #[test]
    fn test_clone_from_relative_source() {
        let fx = Fixture::new();
        let oid = fx.commit("a.txt", "1", "Initial commit", "a@example.com");
        fx.tag("v1.0.0", oid);

        let temp = TempDir::new_in(".").unwrap();
        let first = temp.path().join("first");
        clone_repo(&fx.path().to_string_lossy(), &first).unwrap();

        let second = temp.path().join("nested").join("second");
        std::fs::create_dir_all(second.parent().unwrap()).unwrap();
        let repo = clone_repo(&first.to_string_lossy(), &second).unwrap();

        assert!(repo.find_tag("v1.0.0").unwrap().is_some());
    }

    #[test]
    fn test_clone_missing_source() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");
        let result = clone_repo(&missing.to_string_lossy(), &temp.path().join("clone"));
        assert!(matches!(result, Err(GitError::CloneFailed { .. })));
    }
}
