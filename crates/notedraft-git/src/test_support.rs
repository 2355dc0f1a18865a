//! Repository fixtures shared by unit tests

use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// A scratch repository with helpers for committing and tagging
pub(crate) struct Fixture {
    pub temp: TempDir,
    pub repo: Repository,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        Self { temp, repo }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `content` to `file` and commit it with `message`
    pub fn commit(&self, file: &str, content: &str, message: &str, email: &str) -> Oid {
        std::fs::write(self.temp.path().join(file), content).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", email).unwrap();

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).unwrap();
        self.repo
            .tag_lightweight(name, commit.as_object(), false)
            .unwrap();
    }

    pub fn annotated_tag(&self, name: &str, oid: Oid, message: &str) {
        let commit = self.repo.find_commit(oid).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        self.repo
            .tag(name, commit.as_object(), &sig, message, false)
            .unwrap();
    }
}
