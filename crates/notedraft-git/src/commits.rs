//! Commit history and tree lookups

use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use notedraft_core::error::GitError;

impl GitRepo {
    /// The unique parentless commit reachable from `rev`.
    ///
    /// Histories with several roots (merged unrelated histories) are rejected
    /// since there is no single earliest commit to diff from.
    #[instrument(skip(self))]
    pub fn root_commit(&self, rev: &str) -> Result<String> {
        let start = self.repo.revparse_single(rev)?.peel_to_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(start.id())?;

        let mut roots = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if commit.parent_count() == 0 {
                roots.push(commit.id().to_string());
            }
        }

        match roots.len() {
            0 => Err(GitError::NoCommits),
            1 => {
                debug!(root = %roots[0], "found root commit");
                Ok(roots.remove(0))
            }
            n => Err(GitError::MultipleRoots(n)),
        }
    }

    /// Contents of `path` as recorded at `rev`
    #[instrument(skip(self))]
    pub fn file_at(&self, rev: &str, path: &str) -> Result<String> {
        let commit = self.repo.revparse_single(rev)?.peel_to_commit()?;
        let tree = commit.tree()?;

        let entry = tree
            .get_path(std::path::Path::new(path))
            .map_err(|_| GitError::FileNotFound {
                path: path.to_string(),
                revision: rev.to_string(),
            })?;
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;

        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::Fixture;
    use crate::GitRepo;
    use notedraft_core::error::GitError;

    #[test]
    fn test_root_commit_is_first() {
        let fx = Fixture::new();
        let first = fx.commit("a.txt", "1", "Initial commit", "a@example.com");
        fx.commit("a.txt", "2", "Second", "a@example.com");
        let head = fx.commit("a.txt", "3", "Third", "a@example.com");
        fx.tag("v0.1.0", head);

        let repo = GitRepo::open(fx.path()).unwrap();
        assert_eq!(repo.root_commit("v0.1.0").unwrap(), first.to_string());
        assert_eq!(repo.root_commit("HEAD").unwrap(), first.to_string());
    }

    #[test]
    fn test_file_at_revision() {
        let fx = Fixture::new();
        let old = fx.commit("package.json", "{\"version\":\"1.0.0\"}", "One", "a@example.com");
        fx.tag("v1.0.0", old);
        fx.commit("package.json", "{\"version\":\"1.1.0\"}", "Two", "a@example.com");

        let repo = GitRepo::open(fx.path()).unwrap();
        assert_eq!(
            repo.file_at("v1.0.0", "package.json").unwrap(),
            "{\"version\":\"1.0.0\"}"
        );
        assert_eq!(
            repo.file_at("HEAD", "package.json").unwrap(),
            "{\"version\":\"1.1.0\"}"
        );
    }

    #[test]
    fn test_file_at_missing_path() {
        let fx = Fixture::new();
        fx.commit("a.txt", "1", "Initial commit", "a@example.com");

        let repo = GitRepo::open(fx.path()).unwrap();
        let result = repo.file_at("HEAD", "package.json");
        assert!(matches!(result, Err(GitError::FileNotFound { .. })));
    }
}
