//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::version::VERSION_PLACEHOLDER;

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_tag_format(config)?;
    validate_repos(config)?;
    validate_buckets(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_tag_format(config: &Config) -> Result<()> {
    if config.tag_format.matches(VERSION_PLACEHOLDER).count() != 1 {
        return Err(invalid("tag_format", "must contain exactly one {version} placeholder").into());
    }
    Ok(())
}

fn validate_identifier(field: String, identifier: &str) -> Result<()> {
    match identifier.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(invalid(field, format!("'{}' is not an owner/name identifier", identifier)).into()),
    }
}

fn validate_repos(config: &Config) -> Result<()> {
    validate_identifier("union.identifier".to_string(), &config.union.identifier)?;

    if config.union.manifest.trim().is_empty() {
        return Err(invalid("union.manifest", "manifest path cannot be empty").into());
    }

    let mut names = HashSet::new();
    for (i, dep) in config.dependencies.iter().enumerate() {
        if dep.name.is_empty() {
            return Err(invalid(format!("dependencies[{}].name", i), "name cannot be empty").into());
        }
        if dep.package.is_empty() {
            return Err(
                invalid(format!("dependencies[{}].package", i), "package cannot be empty").into(),
            );
        }
        validate_identifier(format!("dependencies[{}].identifier", i), &dep.identifier)?;
        if !names.insert(dep.name.as_str()) {
            return Err(invalid(
                format!("dependencies[{}].name", i),
                format!("duplicate dependency name '{}'", dep.name),
            )
            .into());
        }
    }

    if let Some(aux) = &config.auxiliary {
        validate_identifier("auxiliary.identifier".to_string(), &aux.identifier)?;
        if names.contains(aux.name.as_str()) {
            return Err(invalid(
                "auxiliary.name",
                format!("'{}' is already used by a dependency", aux.name),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_buckets(config: &Config) -> Result<()> {
    for (i, bucket) in config.buckets.tags.iter().enumerate() {
        if bucket.tag.trim().is_empty() {
            return Err(invalid(format!("buckets.tags[{}].tag", i), "tag cannot be empty").into());
        }
        if bucket.title.trim().is_empty() {
            return Err(
                invalid(format!("buckets.tags[{}].title", i), "title cannot be empty").into(),
            );
        }
    }

    if config.buckets.fallback_title.trim().is_empty() {
        return Err(invalid("buckets.fallback_title", "title cannot be empty").into());
    }

    Ok(())
}
