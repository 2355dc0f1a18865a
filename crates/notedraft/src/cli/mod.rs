//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use notedraft_core::config::{resolve_config, Config};

use commands::{DraftCommand, InitCommand, VersionsCommand};

/// notedraft - Draft release notes across a multi-repository package union
#[derive(Debug, Parser)]
#[command(name = "notedraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: discovered from the working directory)
    #[arg(short, long, global = true, env = "NOTEDRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Draft release notes for a union version range
    Draft(DraftCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// List the union versions that can start or end a range
    Versions(VersionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change to {}", dir.display()))?;
        }

        match &self.command {
            Commands::Draft(cmd) => cmd.execute(self),
            Commands::Init(cmd) => cmd.execute(self),
            Commands::Versions(cmd) => cmd.execute(self),
        }
    }

    /// Load the configuration named by `--config` or discovered from the
    /// working directory
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let cwd = std::env::current_dir()?;
        let (config, path) = resolve_config(self.config.as_deref(), &cwd)?;
        match &path {
            Some(path) => debug!(path = %path.display(), "using config file"),
            None => debug!("using default config"),
        }
        Ok(config)
    }
}
