//! Union package manifest handling

use std::collections::HashMap;

use serde::Deserialize;

use notedraft_core::error::Result;
use notedraft_core::version::strip_range_operator;

/// The parts of a package.json the drafter reads
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Package name
    #[serde(default)]
    pub name: Option<String>,

    /// Package version
    #[serde(default)]
    pub version: Option<String>,

    /// Dependencies
    #[serde(default)]
    pub dependencies: HashMap<String, String>,

    /// Peer dependencies
    #[serde(default)]
    pub peer_dependencies: HashMap<String, String>,

    /// Dev dependencies
    #[serde(default)]
    pub dev_dependencies: HashMap<String, String>,
}

impl PackageManifest {
    /// Parse manifest JSON
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Pinned version of `package`, with range operators stripped.
    ///
    /// Looks in dependencies, then peer, then dev dependencies.
    pub fn dependency_version(&self, package: &str) -> Option<String> {
        [
            &self.dependencies,
            &self.peer_dependencies,
            &self.dev_dependencies,
        ]
        .into_iter()
        .find_map(|deps| deps.get(package))
        .map(|spec| strip_range_operator(spec).to_string())
        .filter(|v| !v.is_empty())
    }
}
