//! Version range selection

use semver::Version;
use tracing::{debug, info, instrument};

use notedraft_core::error::{Result, VersionError};
use notedraft_core::version::version_from_tag;

use crate::types::VersionRange;

/// Source of interactive answers
pub trait Prompter {
    /// Ask for a line of input. `default` is shown as the suggested value;
    /// an empty answer is returned as-is.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;
}

/// Chooses a start and end version from the tagged versions of a repository
#[derive(Debug, Clone)]
pub struct VersionResolver {
    label: String,
    tag_format: String,
    versions: Vec<String>,
}

impl VersionResolver {
    /// Create a resolver over `versions`, oldest first
    pub fn new(
        label: impl Into<String>,
        tag_format: impl Into<String>,
        versions: Vec<String>,
    ) -> Result<Self> {
        let label = label.into();
        if versions.is_empty() {
            return Err(VersionError::NoVersions(label).into());
        }
        Ok(Self {
            label,
            tag_format: tag_format.into(),
            versions,
        })
    }

    /// The newest tagged version
    pub fn newest(&self) -> &str {
        // new() rejects an empty list
        &self.versions[self.versions.len() - 1]
    }

    /// Normalize input (with or without the tag prefix) to a known version
    pub fn validate(&self, input: &str) -> Result<String> {
        let input = input.trim();
        let version = version_from_tag(&self.tag_format, input).unwrap_or_else(|| input.to_string());

        if self.versions.iter().any(|v| *v == version) {
            Ok(version)
        } else {
            Err(VersionError::UnknownVersion {
                version: input.to_string(),
                valid: self.versions.clone(),
            }
            .into())
        }
    }

    /// Resolve the range from flags, prompting for whatever is missing.
    ///
    /// A blank end defaults to the newest version; a blank start is an error.
    #[instrument(skip(self, prompter), fields(label = %self.label))]
    pub fn resolve(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        prompter: &mut dyn Prompter,
    ) -> Result<VersionRange> {
        let start = match start {
            Some(s) => s.to_string(),
            None => prompter.input(&format!("{} start version", self.label), None)?,
        };
        if start.trim().is_empty() {
            return Err(VersionError::MissingStart.into());
        }
        let start = self.validate(&start)?;

        let end = match end {
            Some(e) => e.to_string(),
            None => prompter.input(
                &format!("{} end version", self.label),
                Some(self.newest()),
            )?,
        };
        let end = if end.trim().is_empty() {
            debug!(newest = self.newest(), "end version defaulted");
            self.newest().to_string()
        } else {
            self.validate(&end)?
        };

        let older = Version::parse(&start).map_err(VersionError::from)?;
        let newer = Version::parse(&end).map_err(VersionError::from)?;
        if older >= newer {
            return Err(VersionError::InvalidRange { start, end }.into());
        }

        info!(start = %start, end = %end, "resolved version range");
        Ok(VersionRange::new(start, end))
    }
}
