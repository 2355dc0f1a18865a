//! Notedraft Git - Repository access for release notes drafting
//!
//! Tags, manifests at historical revisions and root commits are read through
//! git2. Cloning and formatted log queries shell out to the git CLI.

mod cli;
mod commits;
pub mod log;
mod remote;
mod repository;
mod tags;
#[cfg(test)]
mod test_support;
pub mod types;

pub use cli::run_git;
pub use log::{parse_log, LogRange, LOG_FORMAT};
pub use remote::{clone_repo, prepare_scratch_dir};
pub use repository::{GitRepo, Result};
pub use types::{short_hash, Commit, TagInfo};
