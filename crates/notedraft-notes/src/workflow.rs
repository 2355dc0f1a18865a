//! Draft collection: clone, resolve and extract every repository

use tracing::{info, instrument};

use notedraft_core::config::Config;
use notedraft_core::error::Result;
use notedraft_core::format_tag;

use crate::extract::extract_commits;
use crate::resolver::{Prompter, VersionResolver};
use crate::sync::RepoSynchronizer;
use crate::types::{RepoCommits, VersionRange};

/// Versions given on the command line; missing ones are prompted for
#[derive(Debug, Clone, Default)]
pub struct DraftOptions {
    pub start: Option<String>,
    pub end: Option<String>,
    pub aux_start: Option<String>,
    pub aux_end: Option<String>,
}

/// Everything needed to render the notes
#[derive(Debug, Clone)]
pub struct Draft {
    /// Union version range
    pub range: VersionRange,
    /// One entry per dependency, then the auxiliary repository
    pub repos: Vec<RepoCommits>,
}

/// Runs the collection steps in order against a synchronizer
pub struct DraftWorkflow<'a> {
    config: &'a Config,
    sync: RepoSynchronizer<'a>,
}

impl<'a> DraftWorkflow<'a> {
    /// Create a workflow using `config`, cloning into its scratch directory
    pub fn new(config: &'a Config) -> Self {
        Self::with_scratch_dir(config, config.scratch_dir.clone())
    }

    /// Create a workflow cloning into `scratch_dir`
    pub fn with_scratch_dir(config: &'a Config, scratch_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            config,
            sync: RepoSynchronizer::new(config, scratch_dir),
        }
    }

    /// The synchronizer driving the clones
    pub fn synchronizer(&self) -> &RepoSynchronizer<'a> {
        &self.sync
    }

    /// Valid union versions, oldest first. Clones the union repository.
    pub fn union_versions(&self) -> Result<Vec<String>> {
        self.sync.prepare()?;
        let union = self.sync.clone_fresh(&self.config.union.repo())?;
        Ok(union.versions(&self.config.tag_format)?)
    }

    /// Resolve ranges and extract commits for every repository
    #[instrument(skip_all, fields(union = %self.config.union.name))]
    pub fn collect(&self, options: &DraftOptions, prompter: &mut dyn Prompter) -> Result<Draft> {
        let tag_format = &self.config.tag_format;
        self.sync.prepare()?;

        let union = self.sync.clone_fresh(&self.config.union.repo())?;
        let resolver = VersionResolver::new(
            &self.config.union.name,
            tag_format,
            union.versions(tag_format)?,
        )?;
        let range = resolver.resolve(options.start.as_deref(), options.end.as_deref(), prompter)?;

        let start_manifest = self.sync.union_manifest(&union, &range.start)?;
        let end_manifest = self.sync.union_manifest(&union, &range.end)?;
        info!(
            start = %format_tag(tag_format, &range.start),
            end = %format_tag(tag_format, &range.end),
            "read union manifests"
        );

        let mut repos = Vec::with_capacity(self.config.dependencies.len() + 1);
        for dep in &self.config.dependencies {
            let git = self.sync.clone_fresh(&dep.repo())?;
            let repo = self
                .sync
                .resolve_dependency(dep, &git, &start_manifest, &end_manifest, &range)?;
            repos.push(extract_commits(&repo, &git, tag_format)?);
        }

        if let Some(aux) = &self.config.auxiliary {
            let git = self.sync.clone_fresh(aux)?;
            let aux_resolver = VersionResolver::new(&aux.name, tag_format, git.versions(tag_format)?)?;
            let aux_range = aux_resolver.resolve(
                options.aux_start.as_deref(),
                options.aux_end.as_deref(),
                prompter,
            )?;
            let repo = self.sync.resolve_tagged(aux, &git, &aux_range)?;
            repos.push(extract_commits(&repo, &git, tag_format)?);
        }

        info!(
            repos = repos.len(),
            commits = repos.iter().map(|r| r.commits.len()).sum::<usize>(),
            "collected draft"
        );
        Ok(Draft { range, repos })
    }
}
