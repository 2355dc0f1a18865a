//! Repository cloning and start/end resolution

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use notedraft_core::config::{Config, DependencyConfig, RepoConfig};
use notedraft_core::error::{Result, VersionError};
use notedraft_core::format_tag;
use notedraft_git::{clone_repo, prepare_scratch_dir, GitRepo};

use crate::manifest::PackageManifest;
use crate::types::{Repo, VersionRange};

/// Clones repositories into the scratch directory and resolves their ranges
pub struct RepoSynchronizer<'a> {
    config: &'a Config,
    scratch_dir: PathBuf,
}

impl<'a> RepoSynchronizer<'a> {
    /// Create a synchronizer writing clones under `scratch_dir`
    pub fn new(config: &'a Config, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Scratch directory in use
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Wipe and recreate the scratch directory
    pub fn prepare(&self) -> Result<()> {
        Ok(prepare_scratch_dir(&self.scratch_dir)?)
    }

    /// Remove the scratch directory and every clone in it
    pub fn cleanup(&self) -> Result<()> {
        if self.scratch_dir.exists() {
            std::fs::remove_dir_all(&self.scratch_dir)?;
            info!(dir = %self.scratch_dir.display(), "removed scratch directory");
        }
        Ok(())
    }

    /// Fresh clone of `repo`
    #[instrument(skip(self), fields(identifier = %repo.identifier))]
    pub fn clone_fresh(&self, repo: &RepoConfig) -> Result<GitRepo> {
        let dest = self.scratch_dir.join(repo.identifier.replace('/', "__"));
        let url = self.config.clone_url(&repo.identifier);
        Ok(clone_repo(&url, &dest)?)
    }

    /// The union manifest as recorded at `version`
    pub fn union_manifest(&self, union: &GitRepo, version: &str) -> Result<PackageManifest> {
        let tag = format_tag(&self.config.tag_format, version);
        let content = union.file_at(&tag, &self.config.union.manifest)?;
        PackageManifest::parse(&content)
    }

    /// Resolve a dependency's range from the union manifests at both ends.
    ///
    /// The end version must be tagged in the dependency. A start version that
    /// is missing from the start manifest or untagged falls back to the
    /// dependency's root commit.
    #[instrument(skip(self, git, start_manifest, end_manifest), fields(dependency = %dep.name))]
    pub fn resolve_dependency(
        &self,
        dep: &DependencyConfig,
        git: &GitRepo,
        start_manifest: &PackageManifest,
        end_manifest: &PackageManifest,
        range: &VersionRange,
    ) -> Result<Repo> {
        let tag_format = &self.config.tag_format;
        let mut repo = Repo::from_config(&dep.repo());

        let end_version = end_manifest
            .dependency_version(&dep.package)
            .ok_or_else(|| VersionError::MissingDependency {
                package: dep.package.clone(),
                manifest: self.config.union.manifest.clone(),
                revision: format_tag(tag_format, &range.end),
            })?;
        let end_tag = format_tag(tag_format, &end_version);
        git.require_tag(&end_tag)?;
        repo.end_version = Some(end_version);

        let start_tag = start_manifest
            .dependency_version(&dep.package)
            .map(|v| (format_tag(tag_format, &v), v));

        match start_tag {
            Some((tag, version)) => match git.find_tag(&tag)? {
                Some(info) => {
                    repo.start_version = Some(version);
                    repo.start_commit = Some(info.commit_hash);
                }
                None => {
                    warn!(tag = %tag, "start tag missing, falling back to root commit");
                    repo.start_commit = Some(git.root_commit(&end_tag)?);
                }
            },
            None => {
                info!(package = %dep.package, "dependency new in range, using root commit");
                repo.start_commit = Some(git.root_commit(&end_tag)?);
            }
        }

        info!(
            start = ?repo.start_version,
            end = ?repo.end_version,
            start_commit = ?repo.start_commit,
            "resolved dependency range"
        );
        Ok(repo)
    }

    /// Resolve a repository from a version range chosen on its own tags
    pub fn resolve_tagged(
        &self,
        config: &RepoConfig,
        git: &GitRepo,
        range: &VersionRange,
    ) -> Result<Repo> {
        let tag_format = &self.config.tag_format;
        let start = git.require_tag(&format_tag(tag_format, &range.start))?;
        git.require_tag(&format_tag(tag_format, &range.end))?;

        let mut repo = Repo::from_config(config);
        repo.start_version = Some(range.start.clone());
        repo.end_version = Some(range.end.clone());
        repo.start_commit = Some(start.commit_hash);
        Ok(repo)
    }
}
