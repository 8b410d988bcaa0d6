//! Build environment selection.

use serde::{Deserialize, Serialize};

/// The two build modes a pipeline can be composed for.
///
/// The environment is read once per invocation and is immutable afterwards.
/// It selects output filename templates and the public base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildEnvironment {
    /// Fast rebuilds, unfingerprinted entry chunks, local package mounts.
    #[default]
    Development,
    /// Fingerprinted output names and CDN-served external dependencies.
    Production,
}

impl BuildEnvironment {
    /// Read the environment selector from the process environment.
    ///
    /// `PACKLINE_ENV` takes precedence over `NODE_ENV`. Any value other
    /// than `production` selects development.
    pub fn from_process_env() -> Self {
        let raw = std::env::var("PACKLINE_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_default();
        Self::from_flag(&raw)
    }

    /// Parse a raw selector string.
    pub fn from_flag(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}
