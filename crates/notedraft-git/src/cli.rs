//! git CLI invocation

use std::path::Path;
use std::process::Command;

use tracing::{debug, instrument};

use crate::repository::Result;
use notedraft_core::error::GitError;

/// Run `git <args>` in `dir` and return its stdout.
///
/// A non-zero exit status becomes [`GitError::CommandFailed`] carrying stderr.
#[instrument(fields(dir = %dir.display()))]
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let start = std::time::Instant::now();
    let command = format!("git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| GitError::CommandFailed {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    debug!(
        command = %command,
        duration_ms = start.elapsed().as_millis(),
        success = output.status.success(),
        "git (CLI)"
    );

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_git_version() {
        let temp = TempDir::new().unwrap();
        let out = run_git(temp.path(), &["--version"]).unwrap();
        assert!(out.starts_with("git version"));
    }

    #[test]
    fn test_run_git_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let err = run_git(temp.path(), &["log"]).unwrap_err();
        match err {
            GitError::CommandFailed { command, stderr } => {
                assert_eq!(command, "git log");
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
