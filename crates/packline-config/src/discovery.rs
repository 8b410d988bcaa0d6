//! File-based declaration discovery.
//!
//! Finds and loads project declarations from conventional locations. This is
//! for CLI-style drivers; library users construct `ProjectOptions` directly
//! or through `ProjectOptions::from_value`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::project::ProjectOptions;

/// Searches for declaration files under a project root.
///
/// # Example
///
/// ```no_run
/// use packline_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let options = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a declaration file in the root directory.
    ///
    /// Searches in this order:
    /// 1. packline.toml
    /// 2. package.json (packline field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("packline.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get("packline").is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load declarations from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no declaration file exists.
    pub fn load(&self) -> Result<ProjectOptions> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    fn load_from(&self, path: &Path) -> Result<ProjectOptions> {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "packline.toml".to_string(),
            hint: e.to_string(),
        })
    }

    fn load_from_package_json(&self, path: &Path) -> Result<ProjectOptions> {
        let content = fs::read_to_string(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: e.to_string(),
            })?;

        let packline = parsed
            .get("packline")
            .filter(|v| !v.is_null())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "packline".to_string(),
                hint: "add a 'packline' field to package.json".to_string(),
            })?;

        ProjectOptions::from_value(packline.clone())
    }
}

/// Discover and load declarations from the current directory.
pub fn discover() -> Result<ProjectOptions> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_declarations() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_prefers_the_toml_file() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("packline.toml");
        fs::write(&toml_path, "").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "packline": {} }"#,
        )
        .unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), toml_path);
    }

    #[test]
    fn load_returns_not_found_without_declarations() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }

    #[test]
    fn package_json_without_packline_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }
}
