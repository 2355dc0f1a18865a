//! Tag operations

use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use notedraft_core::error::GitError;
use notedraft_core::version::version_from_tag;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag: report the commit it ultimately points at
                if let Ok(commit) = tag.as_object().peel_to_commit() {
                    let mut info = TagInfo::new(&name, commit.id().to_string());
                    if let Some(msg) = tag.message() {
                        info = info.with_message(msg.trim());
                    }
                    tags.push(info);
                }
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Find a tag that must exist
    pub fn require_tag(&self, name: &str) -> Result<TagInfo> {
        self.find_tag(name)?.ok_or_else(|| GitError::TagNotFound {
            repo: self.label(),
            tag: name.to_string(),
        })
    }

    /// Versions tagged with `tag_format`, oldest first.
    ///
    /// Tags that do not follow the format or whose version is not valid
    /// semver are ignored.
    #[instrument(skip(self))]
    pub fn versions(&self, tag_format: &str) -> Result<Vec<String>> {
        let mut versioned: Vec<(Version, String)> = self
            .tags()?
            .into_iter()
            .filter_map(|t| version_from_tag(tag_format, &t.name))
            .filter_map(|v| Version::parse(&v).ok().map(|parsed| (parsed, v)))
            .collect();

        versioned.sort_by(|a, b| a.0.cmp(&b.0));
        versioned.dedup_by(|a, b| a.0 == b.0);

        debug!(count = versioned.len(), "collected versioned tags");
        Ok(versioned.into_iter().map(|(_, v)| v).collect())
    }
}
