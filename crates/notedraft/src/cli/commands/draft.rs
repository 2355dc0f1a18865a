//! Draft command

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use notedraft_core::config::Config;
use notedraft_core::error::NotesError;
use notedraft_core::NotedraftError;
use notedraft_notes::{
    DraftOptions, DraftWorkflow, GitHubClient, NotesGenerator, Prompter, RepoCommits,
};

use crate::cli::output::{self, path_style, version_style};
use crate::cli::Cli;

/// Draft release notes for a union version range
#[derive(Debug, Args)]
pub struct DraftCommand {
    /// Union start version (prompted when omitted)
    #[arg(long)]
    pub start: Option<String>,

    /// Union end version (prompted when omitted, newest by default)
    #[arg(long)]
    pub end: Option<String>,

    /// Auxiliary repository start version
    #[arg(long)]
    pub aux_start: Option<String>,

    /// Auxiliary repository end version
    #[arg(long)]
    pub aux_end: Option<String>,

    /// Output file (defaults to the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for fresh clones (wiped before use)
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// Keep the clones after a successful run
    #[arg(long)]
    pub keep_scratch: bool,
}

/// Prompts on the terminal for versions that were not given as flags
struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> notedraft_core::Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map_err(|e| NotedraftError::other(format!("Failed to read input: {}", e)))
    }
}

/// Fail early when the git executable is missing
pub(super) fn require_git() -> anyhow::Result<()> {
    which::which("git").context("git executable not found on PATH")?;
    Ok(())
}

impl DraftCommand {
    /// Execute the draft command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            start = ?self.start,
            end = ?self.end,
            keep_scratch = self.keep_scratch,
            "executing draft command"
        );
        require_git()?;

        let mut config = cli.load_config()?;
        if let Some(dir) = &self.scratch_dir {
            config.scratch_dir = dir.clone();
        }
        let output_path = self.output.clone().unwrap_or_else(|| config.output.clone());

        let options = DraftOptions {
            start: self.start.clone(),
            end: self.end.clone(),
            aux_start: self.aux_start.clone(),
            aux_end: self.aux_end.clone(),
        };
        let workflow = DraftWorkflow::new(&config);
        let draft = workflow.collect(&options, &mut TerminalPrompter)?;

        let token = read_token(&config)?;
        let generator = NotesGenerator::new(&config)?;

        let spinner = if cli.quiet {
            ProgressBar::hidden()
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let notes = runtime.block_on(async {
            spinner.set_message("Authenticating");
            let client = GitHubClient::new(&config.github.api_url, token)?;
            let login = client.authenticate().await?;
            info!(login = %login, "authenticated to code review API");

            spinner.set_message("Resolving commit authors");
            generator.generate(&draft.range, &draft.repos, &client).await
        });
        spinner.finish_and_clear();
        let notes = notes?;

        write_notes(&output_path, &generator.render(&notes))?;

        if self.keep_scratch {
            info!(dir = %workflow.synchronizer().scratch_dir().display(), "keeping scratch directory");
        } else if let Err(e) = workflow.synchronizer().cleanup() {
            warn!(error = %e, "failed to remove scratch directory");
        }

        if !cli.quiet {
            print_summary(&output_path, &draft.range.start, &draft.range.end, &draft.repos);
        }
        Ok(())
    }
}

/// Token from the configured environment variable, or a hidden prompt
fn read_token(config: &Config) -> anyhow::Result<String> {
    if let Ok(token) = std::env::var(&config.github.token_env) {
        if !token.trim().is_empty() {
            info!(var = %config.github.token_env, "using token from environment");
            return Ok(token.trim().to_string());
        }
    }

    let token = Password::new()
        .with_prompt(format!("GitHub token (or set {})", config.github.token_env))
        .interact()?;
    if token.trim().is_empty() {
        return Err(NotesError::AuthenticationFailed("no token given".to_string()).into());
    }
    Ok(token.trim().to_string())
}

fn write_notes(path: &Path, content: &str) -> anyhow::Result<()> {
    let write_err = |e: std::io::Error| NotesError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)?;
    info!(path = %path.display(), bytes = content.len(), "wrote release notes");
    Ok(())
}

fn print_summary(path: &Path, start: &str, end: &str, repos: &[RepoCommits]) {
    output::success(&format!(
        "Drafted {} → {} to {}",
        version_style().apply_to(start),
        version_style().apply_to(end),
        path_style().apply_to(path.display())
    ));
    for repo in repos {
        let range = format!(
            "{} → {}, {} commits",
            repo.start_version.as_deref().unwrap_or("root"),
            repo.end_version,
            repo.commits.len()
        );
        println!("{}", output::key_value(&repo.repo.name, &range));
        if repo.is_empty() {
            output::warning(&format!("No changes in {}", repo.repo.identifier));
        }
    }
}
