//! Error types for declaration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Declaration loading errors
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for {field}: {hint}")]
    InvalidValue { field: String, hint: String },

    // Schema validation errors (no filesystem checks)
    #[error("no entry points specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("external dependency table declares {name} more than once")]
    DuplicateExternalDependency { name: String },

    // Filesystem validation errors (for CLI use)
    #[error("entry path not found: {}", path.display())]
    EntryNotFound { path: PathBuf },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
