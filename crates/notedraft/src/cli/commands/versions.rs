//! Versions command

use clap::Args;
use tracing::info;

use notedraft_notes::DraftWorkflow;

use crate::cli::output::{self, version_style};
use crate::cli::Cli;

/// List the union versions that can start or end a range
#[derive(Debug, Args)]
pub struct VersionsCommand {}

impl VersionsCommand {
    /// Execute the versions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing versions command");
        super::draft::require_git()?;
        let config = cli.load_config()?;

        let workflow = DraftWorkflow::new(&config);
        let versions = workflow.union_versions()?;
        workflow.synchronizer().cleanup()?;

        if cli.quiet {
            for version in versions.iter().rev() {
                println!("{}", version);
            }
            return Ok(());
        }

        output::info(&format!(
            "{} tagged versions of {}",
            versions.len(),
            config.union.identifier
        ));
        for version in versions.iter().rev() {
            println!("  {}", version_style().apply_to(version));
        }
        Ok(())
    }
}
