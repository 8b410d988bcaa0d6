//! Project-level declarations composed into a pipeline.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::external::ExternalTable;
use crate::rules::{RuleSet, UnmatchedPolicy};
use crate::settings::GlobalSettings;

/// Where build products land and how they are addressed publicly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Root directory for all build products, relative to the project root.
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// Subdirectory of `assets_root` that hashed assets are emitted under.
    /// This is a URL path segment, so it uses forward slashes on every
    /// platform.
    #[serde(default = "default_assets_subdir")]
    pub assets_subdir: String,

    /// Public base path used in production.
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Public base path used in development.
    #[serde(default = "default_public_path")]
    pub dev_public_path: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            assets_subdir: default_assets_subdir(),
            public_path: default_public_path(),
            dev_public_path: default_public_path(),
        }
    }
}

/// Target of an import alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasTarget {
    /// Project-relative directory, resolved to an absolute path once at
    /// composition time.
    Dir { dir: PathBuf },
    /// Package specifier passed through to the engine untouched.
    Package(String),
}

/// Everything a project declares about its build pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectOptions {
    /// Entry points, name to project-relative module path.
    #[serde(default = "default_entries")]
    pub entries: IndexMap<String, PathBuf>,

    #[serde(default)]
    pub output: OutputOptions,

    /// Import aliases, resolved exactly once at composition time.
    #[serde(default = "default_aliases")]
    pub aliases: IndexMap<String, AliasTarget>,

    /// Extensions tried when resolving extensionless imports.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directories the lint and transpile rules apply within, relative to
    /// the project root. Rules with their own include list override this.
    #[serde(default = "default_include")]
    pub include: Vec<PathBuf>,

    /// Ordered transform rules.
    #[serde(default)]
    pub rules: RuleSet,

    /// Runtime dependencies excluded from the bundle.
    #[serde(default)]
    pub externals: ExternalTable,

    /// What to do with files no rule matches.
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,

    #[serde(default)]
    pub settings: GlobalSettings,
}

impl ProjectOptions {
    /// Create from a `serde_json::Value` (for programmatic configuration).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "project".to_string(),
            hint: e.to_string(),
        })
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "project".to_string(),
            hint: e.to_string(),
        })
    }

    /// The observed reference SPA project: one `app` entry, `dist/static`
    /// output, root public paths, `@` and `vue$` aliases, and the full
    /// reference rule and external tables.
    pub fn reference() -> Self {
        Self {
            externals: ExternalTable::reference(),
            ..Self::default()
        }
    }

    /// Add or replace an entry point.
    pub fn with_entry(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), path.into());
        self
    }

    /// Add or replace an alias.
    pub fn with_alias(mut self, name: impl Into<String>, target: AliasTarget) -> Self {
        self.aliases.insert(name.into(), target);
        self
    }
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            output: OutputOptions::default(),
            aliases: default_aliases(),
            extensions: default_extensions(),
            include: default_include(),
            rules: RuleSet::default(),
            externals: ExternalTable::default(),
            unmatched: UnmatchedPolicy::default(),
            settings: GlobalSettings::default(),
        }
    }
}

fn default_entries() -> IndexMap<String, PathBuf> {
    let mut entries = IndexMap::new();
    entries.insert("app".to_string(), PathBuf::from("src/main.js"));
    entries
}

fn default_aliases() -> IndexMap<String, AliasTarget> {
    let mut aliases = IndexMap::new();
    aliases.insert(
        "vue$".to_string(),
        AliasTarget::Package("vue/dist/vue.esm.js".to_string()),
    );
    aliases.insert(
        "@".to_string(),
        AliasTarget::Dir {
            dir: PathBuf::from("src"),
        },
    );
    aliases
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".vue".to_string(), ".json".to_string()]
}

fn default_include() -> Vec<PathBuf> {
    vec![PathBuf::from("src"), PathBuf::from("test")]
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("dist")
}

fn default_assets_subdir() -> String {
    "static".to_string()
}

fn default_public_path() -> String {
    "/".to_string()
}
