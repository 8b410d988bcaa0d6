//! Dependency manifest collaborator.
//!
//! External dependency versions are owned by the consuming project's
//! package manifest, not computed here. This module parses just enough of a
//! `package.json` to answer `version_of` queries during external
//! resolution.

use std::fs;
use std::path::Path;

use packline_config::ConfigError;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::Result;

/// Versions declared by the consuming project.
#[derive(Debug, Clone, Default)]
pub struct DependencyManifest {
    versions: FxHashMap<String, String>,
}

impl DependencyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `dependencies` and `devDependencies` from a package.json blob.
    /// Range operators are stripped, so `^0.18.0` answers as `0.18.0`.
    pub fn from_package_json(content: &str) -> Result<Self> {
        let parsed: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: e.to_string(),
            })?;

        let mut versions = FxHashMap::default();
        for section in ["dependencies", "devDependencies"] {
            if let Some(map) = parsed.get(section).and_then(Value::as_object) {
                for (name, raw) in map {
                    if let Some(raw) = raw.as_str() {
                        versions.insert(name.clone(), strip_range(raw).to_string());
                    }
                }
            }
        }

        Ok(Self { versions })
    }

    /// Load a manifest file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_package_json(&content)
    }

    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(name.into(), version.into());
    }

    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(String, String)> for DependencyManifest {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

/// Strip semver range operators: `^1.2.3` and `~1.2.3` pin to `1.2.3`.
fn strip_range(raw: &str) -> &str {
    raw.trim().trim_start_matches(['^', '~', '=', '>', '<', 'v'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_dependency_sections() {
        let manifest = DependencyManifest::from_package_json(
            r#"{
                "dependencies": { "axios": "^0.18.0", "vue": "2.5.2" },
                "devDependencies": { "webpack": "~3.6.0" }
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.version_of("axios"), Some("0.18.0"));
        assert_eq!(manifest.version_of("vue"), Some("2.5.2"));
        assert_eq!(manifest.version_of("webpack"), Some("3.6.0"));
        assert_eq!(manifest.version_of("lodash"), None);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(DependencyManifest::from_package_json("{ not json").is_err());
    }

    #[test]
    fn strips_common_range_operators() {
        assert_eq!(strip_range("^1.2.3"), "1.2.3");
        assert_eq!(strip_range("~0.9.1"), "0.9.1");
        assert_eq!(strip_range(" v4.17.4"), "4.17.4");
        assert_eq!(strip_range("1.0.0"), "1.0.0");
    }
}
