//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use notedraft_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};
use notedraft_core::config::Config;

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Write a default notedraft configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path (a .toml extension writes TOML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if cli.quiet {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, config_content(&config_path)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!(
                "  1. Edit {} to list the union and its dependency repositories",
                config_path.display()
            );
            println!("  2. Run {} to check the union's tags", style("notedraft versions").cyan());
            println!("  3. Run {} to write the notes", style("notedraft draft").cyan());
        }

        Ok(())
    }
}

/// Default configuration rendered in the format implied by `path`
fn config_content(path: &Path) -> anyhow::Result<String> {
    if path.extension().is_some_and(|e| e == "toml") {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        Ok(toml::to_string_pretty(&config)?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_content_is_template() {
        let content = config_content(Path::new("notedraft.yaml")).unwrap();
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_toml_content_round_trips() {
        let content = config_content(Path::new("notedraft.toml")).unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.tag_format, "v{version}");
        assert_eq!(config.dependencies.len(), 4);
    }
}
