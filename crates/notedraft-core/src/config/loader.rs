//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Serialization used by a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Config, ConfigError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError),
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError),
        }
    }
}

/// Read, parse and validate the config file at `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::of(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(path = %path.display(), "config validated");
    Ok(config)
}

/// Nearest config file at or above `start_dir`.
///
/// Each directory is checked for every known file name, first directly
/// and then under `.github/`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir.ancestors().find_map(|dir| {
        config_file_names().into_iter().find_map(|name| {
            [dir.join(name), dir.join(".github").join(name)]
                .into_iter()
                .find(|candidate| candidate.is_file())
        })
    });

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!(start_dir = %start_dir.display(), "no config file found"),
    }
    found
}

/// Load the discovered configuration, or defaults when no file exists.
///
/// A file that is found but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Load an explicitly given config file, or discover one from `dir`.
///
/// An explicit path must exist; discovery falls back to defaults only
/// when no file is found.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            let config = load_config(path)?;
            Ok((config, Some(path.to_path_buf())))
        }
        None => load_config_or_default(dir),
    }
}
