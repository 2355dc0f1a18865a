//! Release notes formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::ReleaseNotes;

/// Trait for release notes formatters
pub trait NotesFormatter: Send + Sync {
    /// Render the whole draft
    fn format(&self, notes: &ReleaseNotes) -> String;
}
