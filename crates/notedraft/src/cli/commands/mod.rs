//! CLI commands

mod draft;
mod init;
mod versions;

pub use draft::DraftCommand;
pub use init::InitCommand;
pub use versions::VersionsCommand;
