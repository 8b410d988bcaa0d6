//! Pluggable declaration validation strategies.
//!
//! Separates schema validation (pure, for library use) from filesystem
//! validation (for CLI drivers). Both run before composition; a failing
//! declaration never produces a pipeline.

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::project::{AliasTarget, ProjectOptions};

/// Trait for pluggable validation strategies.
pub trait ConfigValidator {
    fn validate(&self, options: &ProjectOptions) -> Result<()>;
}

/// Schema-only validation, no filesystem checks.
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, options: &ProjectOptions) -> Result<()> {
        if options.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for name in options.entries.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "entry point names cannot be empty".to_string(),
                    hint: Some("name every entry in the 'entries' table".to_string()),
                });
            }
        }

        for extension in &options.extensions {
            if !extension.starts_with('.') {
                return Err(ConfigError::SchemaValidation {
                    message: format!("resolve extension '{extension}' must start with a dot"),
                    hint: Some("write extensions as '.js', '.vue', ...".to_string()),
                });
            }
        }

        for (alias, target) in &options.aliases {
            let empty = match target {
                AliasTarget::Dir { dir } => dir.as_os_str().is_empty(),
                AliasTarget::Package(spec) => spec.trim().is_empty(),
            };
            if empty {
                return Err(ConfigError::SchemaValidation {
                    message: format!("alias '{alias}' has an empty target"),
                    hint: Some("point each alias at a directory or package".to_string()),
                });
            }
        }

        for entry in &options.externals {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "external dependency names cannot be empty".to_string(),
                    hint: Some("remove unnamed entries from the external table".to_string()),
                });
            }
            if entry.styles_only && entry.styles.is_none() {
                return Err(ConfigError::SchemaValidation {
                    message: format!(
                        "external dependency '{}' is styles-only but declares no stylesheet",
                        entry.name
                    ),
                    hint: Some("set 'styles' or drop 'styles_only'".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator for CLI use: the declared entry modules must exist
/// under the project root.
pub struct FsValidator {
    root: std::path::PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, options: &ProjectOptions) -> Result<()> {
        SchemaValidator.validate(options)?;

        for entry in options.entries.values() {
            let path = self.root.join(entry);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound { path });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation.
pub fn validate_schema(options: &ProjectOptions) -> Result<()> {
    SchemaValidator.validate(options)
}

/// Convenience function for filesystem validation.
pub fn validate_fs(options: &ProjectOptions, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(options)
}
