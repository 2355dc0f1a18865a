//! Notedraft Core - Shared foundations for release notes drafting
//!
//! This crate provides the error taxonomy, configuration system and version
//! helpers used by the git, notes and CLI crates.

pub mod config;
pub mod error;
pub mod version;

pub use config::Config;
pub use error::{NotedraftError, Result};
pub use version::{format_tag, strip_range_operator, version_from_tag};
