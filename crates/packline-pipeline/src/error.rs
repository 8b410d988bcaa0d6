//! Error types for pipeline composition.
//!
//! Every error here is a configuration-time failure: composition aborts
//! before any build work begins and no partial pipeline is ever returned.

use std::path::PathBuf;

use packline_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("path escapes the project root: {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("no rule matches {} and fallback copy is disabled", path.display())]
    UnknownAssetCategory { path: PathBuf },

    #[error("cannot resolve external dependency '{name}': {reason}")]
    UnresolvableExternal { name: String, reason: String },

    #[error("route '{route}' references '{component}', which no alias or entry point reaches")]
    UnroutableComponent { route: String, component: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
