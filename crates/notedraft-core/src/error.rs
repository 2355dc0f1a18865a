//! Error types for notedraft

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using NotedraftError
pub type Result<T> = std::result::Result<T, NotedraftError>;

/// Main error type for notedraft operations
#[derive(Debug, Error)]
pub enum NotedraftError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Release notes errors
    #[error(transparent)]
    Notes(#[from] NotesError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Failed to prepare the scratch directory
    #[error("Failed to prepare scratch directory {path}: {reason}")]
    ScratchFailed { path: PathBuf, reason: String },

    /// Clone failed
    #[error("Failed to clone {url}: {reason}")]
    CloneFailed { url: String, reason: String },

    /// A git CLI invocation exited unsuccessfully
    #[error("Command `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// Tag does not exist in the repository
    #[error("Tag {tag} not found in {repo}")]
    TagNotFound { repo: String, tag: String },

    /// No commits found
    #[error("No commits found in repository")]
    NoCommits,

    /// History has more than one parentless commit
    #[error("Repository has {0} root commits, expected exactly one")]
    MultipleRoots(usize),

    /// File missing at a revision
    #[error("File {path} not found at {revision}")]
    FileNotFound { path: String, revision: String },

    /// Formatted log output could not be split into records
    #[error("Failed to parse git log output: {0}")]
    LogParse(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version is not one of the known tags
    #[error("Unknown version '{version}'. Valid versions: {}", valid.join(", "))]
    UnknownVersion { version: String, valid: Vec<String> },

    /// No tagged versions exist
    #[error("No tagged versions found for {0}")]
    NoVersions(String),

    /// Start version was left blank
    #[error("A start version is required")]
    MissingStart,

    /// Start version is not older than end version
    #[error("Start version {start} must be older than end version {end}")]
    InvalidRange { start: String, end: String },

    /// Repository reached extraction without an end version
    #[error("No end version resolved for {0}")]
    Unresolved(String),

    /// Package missing from a manifest
    #[error("Package {package} not listed in {manifest} at {revision}")]
    MissingDependency {
        package: String,
        manifest: String,
        revision: String,
    },

    /// Semver error
    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),
}

/// Release notes errors
#[derive(Debug, Error)]
pub enum NotesError {
    /// Token rejected by the code-review API
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// API returned an error status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited
    #[error("API rate limit exceeded")]
    RateLimited,

    /// Request could not be sent or decoded
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Failed to write the draft
    #[error("Failed to write release notes to {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

impl NotedraftError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
