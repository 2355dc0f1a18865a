//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for notedraft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The union package whose manifest pins dependency versions
    pub union: UnionConfig,

    /// Dependency repositories pinned by the union manifest
    pub dependencies: Vec<DependencyConfig>,

    /// Related repository versioned independently of the union
    pub auxiliary: Option<RepoConfig>,

    /// Tag format shared by every repository (e.g., "v{version}")
    pub tag_format: String,

    /// Base URL or path that `owner/name` identifiers are cloned from
    pub clone_base: String,

    /// Directory holding fresh clones, wiped at the start of each run
    pub scratch_dir: PathBuf,

    /// Markdown file the draft is written to
    pub output: PathBuf,

    /// Code-review API settings
    pub github: GitHubConfig,

    /// Commit bucketing convention
    pub buckets: BucketsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            union: UnionConfig::default(),
            dependencies: default_dependencies(),
            auxiliary: Some(RepoConfig {
                name: "Node".to_string(),
                identifier: "tensorflow/tfjs-node".to_string(),
            }),
            tag_format: "v{version}".to_string(),
            clone_base: "https://github.com".to_string(),
            scratch_dir: std::env::temp_dir().join("notedraft"),
            output: PathBuf::from("release-notes.md"),
            github: GitHubConfig::default(),
            buckets: BucketsConfig::default(),
        }
    }
}

impl Config {
    /// Clone URL for an `owner/name` identifier
    pub fn clone_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.clone_base.trim_end_matches('/'), identifier)
    }
}

/// A repository known by display name and `owner/name` identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Display name used in headings
    pub name: String,
    /// `owner/name` slug
    pub identifier: String,
}

/// Union package configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnionConfig {
    /// Display name
    pub name: String,
    /// `owner/name` slug
    pub identifier: String,
    /// Manifest path inside the union repository
    pub manifest: String,
}

impl Default for UnionConfig {
    fn default() -> Self {
        Self {
            name: "Union".to_string(),
            identifier: "tensorflow/tfjs".to_string(),
            manifest: "package.json".to_string(),
        }
    }
}

impl UnionConfig {
    /// The repository part of the union
    pub fn repo(&self) -> RepoConfig {
        RepoConfig {
            name: self.name.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

/// A dependency repository and the package name it publishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Display name used in headings
    pub name: String,
    /// `owner/name` slug
    pub identifier: String,
    /// Package name as listed in the union manifest
    pub package: String,
}

impl DependencyConfig {
    /// The repository part of this dependency
    pub fn repo(&self) -> RepoConfig {
        RepoConfig {
            name: self.name.clone(),
            identifier: self.identifier.clone(),
        }
    }
}

fn default_dependencies() -> Vec<DependencyConfig> {
    [
        ("Core", "tfjs-core"),
        ("Data", "tfjs-data"),
        ("Layers", "tfjs-layers"),
        ("Converter", "tfjs-converter"),
    ]
    .into_iter()
    .map(|(name, repo)| DependencyConfig {
        name: name.to_string(),
        identifier: format!("tensorflow/{}", repo),
        package: format!("@tensorflow/{}", repo),
    })
    .collect()
}

/// Code-review API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,

    /// Web URL used for commit and pull request links
    pub web_url: String,

    /// Environment variable consulted before prompting for a token
    pub token_env: String,

    /// Email domains whose authors get no thanks line
    pub skip_thanks_domains: Vec<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            skip_thanks_domains: Vec::new(),
        }
    }
}

/// A tag token and the section it feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTag {
    /// Token at the start of a body line (e.g., "FEATURE")
    pub tag: String,
    /// Section title
    pub title: String,
}

/// Commit bucketing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketsConfig {
    /// Tags in rendering order
    pub tags: Vec<BucketTag>,

    /// Tag that excludes a commit from the notes
    pub skip_tag: Option<String>,

    /// Section for commits without any tag
    pub fallback_title: String,
}

impl Default for BucketsConfig {
    fn default() -> Self {
        let tags = [
            ("BREAKING", "Breaking Changes"),
            ("FEATURE", "Features"),
            ("BUG", "Bug Fixes"),
            ("PERF", "Performance"),
            ("SECURITY", "Security"),
            ("DOC", "Documentation"),
            ("DEV", "Development"),
        ]
        .into_iter()
        .map(|(tag, title)| BucketTag {
            tag: tag.to_string(),
            title: title.to_string(),
        })
        .collect();

        Self {
            tags,
            skip_tag: Some("INTERNAL".to_string()),
            fallback_title: "Misc".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tag_format, "v{version}");
        assert_eq!(config.dependencies.len(), 4);
        assert_eq!(config.dependencies[0].package, "@tensorflow/tfjs-core");
        assert!(config.auxiliary.is_some());
    }

    #[test]
    fn test_clone_url_trims_slash() {
        let config = Config {
            clone_base: "/tmp/remotes/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.clone_url("acme/core"), "/tmp/remotes/acme/core");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("tag_format: \"release-{version}\"\n").unwrap();
        assert_eq!(config.tag_format, "release-{version}");
        assert_eq!(config.buckets.fallback_title, "Misc");
        assert_eq!(config.github.token_env, "GITHUB_TOKEN");
    }
}
