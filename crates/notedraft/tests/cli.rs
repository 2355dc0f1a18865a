//! Exit status and error reporting of the notedraft binary

use std::path::Path;

use assert_cmd::Command;
use git2::{Repository, Signature};
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the caller's config, token and home directory
fn notedraft(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notedraft").unwrap();
    cmd.env("HOME", home)
        .env("GITHUB_TOKEN", "test-token")
        .env_remove("NOTEDRAFT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Union repository at `<base>/acme/union` tagged v1.0.0 and v1.1.0
fn union_origin(base: &Path) {
    let path = base.join("acme").join("union");
    std::fs::create_dir_all(&path).unwrap();
    let repo = Repository::init(&path).unwrap();
    let sig = Signature::now("Dev", "dev@example.com").unwrap();

    for version in ["1.0.0", "1.1.0"] {
        let manifest = serde_json::json!({ "name": "@acme/union", "version": version });
        std::fs::write(path.join("package.json"), manifest.to_string()).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("package.json")).unwrap();
        index.write().unwrap();

        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, &format!("Release {}", version), &tree, &parents)
            .unwrap();
        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight(&format!("v{}", version), commit.as_object(), false)
            .unwrap();
    }
}

/// Config with no dependencies, cloning from `clone_base` into `scratch_dir`
fn write_config(dir: &Path, clone_base: &str, scratch_dir: &str) -> std::path::PathBuf {
    let path = dir.join("notedraft.yaml");
    let yaml = format!(
        "union:\n  name: Acme\n  identifier: acme/union\n  manifest: package.json\n\
         dependencies: []\n\
         auxiliary: null\n\
         clone_base: \"{}\"\n\
         scratch_dir: \"{}\"\n",
        clone_base, scratch_dir
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn test_help_exits_zero() {
    let temp = TempDir::new().unwrap();
    notedraft(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("draft"))
        .stdout(predicate::str::contains("versions"));
}

#[test]
fn test_version_exits_zero() {
    let temp = TempDir::new().unwrap();
    notedraft(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("notedraft"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let temp = TempDir::new().unwrap();
    notedraft(temp.path())
        .args(["draft", "--no-such-flag"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn test_missing_config_exits_one() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.yaml");
    notedraft(temp.path())
        .arg("--config")
        .arg(&missing)
        .arg("versions")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_discovered_config_exits_one() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("notedraft.yaml"), "tag_format: latest\n").unwrap();
    notedraft(temp.path())
        .current_dir(temp.path())
        .arg("versions")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tag_format"));
}

#[test]
fn test_failed_clone_exits_one() {
    let temp = TempDir::new().unwrap();
    let empty = temp.path().join("origin");
    std::fs::create_dir_all(&empty).unwrap();
    let config = write_config(
        temp.path(),
        &empty.to_string_lossy(),
        &temp.path().join("scratch").to_string_lossy(),
    );

    notedraft(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["draft", "--start", "1.0.0", "--end", "1.1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to clone"));
}

#[test]
fn test_unknown_start_exits_one() {
    let temp = TempDir::new().unwrap();
    union_origin(&temp.path().join("origin"));
    let config = write_config(
        temp.path(),
        &temp.path().join("origin").to_string_lossy(),
        &temp.path().join("scratch").to_string_lossy(),
    );

    notedraft(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["draft", "--start", "9.9.9", "--end", "1.1.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown version '9.9.9'"));
}

#[test]
fn test_versions_with_relative_paths() {
    let temp = TempDir::new().unwrap();
    union_origin(&temp.path().join("origin"));
    write_config(temp.path(), "origin", "scratch");

    notedraft(temp.path())
        .current_dir(temp.path())
        .args(["--quiet", "versions"])
        .assert()
        .success()
        .stdout(predicate::eq("1.1.0\n1.0.0\n"));

    assert!(!temp.path().join("scratch").join("scratch").exists());
}
