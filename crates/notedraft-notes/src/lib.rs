//! Notedraft Notes - Release notes drafting pipeline
//!
//! Resolves the union version range, maps it onto every dependency through the
//! union manifest, extracts the commits in each range and renders them as
//! bucketed markdown.

pub mod extract;
pub mod formatter;
pub mod generator;
pub mod github;
pub mod manifest;
pub mod policy;
pub mod resolver;
pub mod sync;
pub mod types;
pub mod workflow;

pub use extract::extract_commits;
pub use formatter::{MarkdownFormatter, NotesFormatter};
pub use generator::NotesGenerator;
pub use github::{GitHubClient, UserDirectory};
pub use manifest::PackageManifest;
pub use policy::{BucketPolicy, Placement, TagLinePolicy};
pub use resolver::{Prompter, VersionResolver};
pub use sync::RepoSynchronizer;
pub use types::{Bucket, NoteEntry, ReleaseNotes, Repo, RepoCommits, RepoNotes, VersionRange};
pub use workflow::{Draft, DraftOptions, DraftWorkflow};
