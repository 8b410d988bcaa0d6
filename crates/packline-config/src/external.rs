//! Declarative table of runtime dependencies served from outside the bundle.
//!
//! Each entry names a package whose code is excluded from bundled output and
//! loaded at run time instead: from a CDN in production, from a local package
//! mount in development. The table preserves declaration order and enforces
//! unique package names at construction, including through deserialization.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// One externally served dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalDependency {
    /// Package name as declared in the dependency manifest.
    pub name: String,

    /// Global binding exposed to application code (e.g. `$` for jquery).
    #[serde(default)]
    pub global: Option<String>,

    /// Path of the script within the package distribution.
    #[serde(default)]
    pub dist_path: Option<String>,

    /// Registry name override when the CDN publishes the package under a
    /// different name.
    #[serde(default)]
    pub cdn_name: Option<String>,

    /// Stylesheet path within the distribution, if the package ships one.
    #[serde(default)]
    pub styles: Option<String>,

    /// The entry contributes only a stylesheet reference: no script
    /// reference, no global binding, no bundler exclusion.
    #[serde(default)]
    pub styles_only: bool,
}

impl ExternalDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: None,
            dist_path: None,
            cdn_name: None,
            styles: None,
            styles_only: false,
        }
    }

    pub fn with_global(mut self, global: impl Into<String>) -> Self {
        self.global = Some(global.into());
        self
    }

    pub fn with_dist_path(mut self, path: impl Into<String>) -> Self {
        self.dist_path = Some(path.into());
        self
    }

    pub fn with_cdn_name(mut self, cdn_name: impl Into<String>) -> Self {
        self.cdn_name = Some(cdn_name.into());
        self
    }

    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = Some(styles.into());
        self
    }

    pub fn styles_only(mut self) -> Self {
        self.styles_only = true;
        self
    }

    /// The name the CDN publishes under.
    pub fn registry_name(&self) -> &str {
        self.cdn_name.as_deref().unwrap_or(&self.name)
    }
}

/// Declaration-ordered table keyed by unique package name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ExternalDependency>", into = "Vec<ExternalDependency>")]
pub struct ExternalTable {
    entries: Vec<ExternalDependency>,
}

impl ExternalTable {
    /// Build a table, rejecting duplicate package names.
    pub fn new(entries: Vec<ExternalDependency>) -> Result<Self> {
        let mut seen = rustc_hash::FxHashSet::default();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateExternalDependency {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The eight reference entries of the observed SPA project.
    pub fn reference() -> Self {
        // Names are unique by construction, so this cannot fail.
        Self {
            entries: vec![
                ExternalDependency::new("jquery")
                    .with_global("$")
                    .with_dist_path("jquery.slim.min.js"),
                ExternalDependency::new("popper.js").with_dist_path("umd/popper.min.js"),
                ExternalDependency::new("bootstrap")
                    .with_cdn_name("twitter-bootstrap")
                    .with_styles("css/bootstrap.css")
                    .with_dist_path("js/bootstrap.min.js"),
                ExternalDependency::new("font-awesome")
                    .with_styles("css/font-awesome.css")
                    .styles_only(),
                ExternalDependency::new("axios").with_dist_path("axios.min.js"),
                ExternalDependency::new("lodash")
                    .with_cdn_name("lodash.js")
                    .with_global("_")
                    .with_dist_path("lodash.min.js"),
                ExternalDependency::new("sockjs-client").with_dist_path("sockjs.min.js"),
                ExternalDependency::new("vertx3-eventbus-client")
                    .with_cdn_name("vertx")
                    .with_global("EventBus")
                    .with_dist_path("vertx-eventbus.min.js"),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExternalDependency> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExternalDependency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ExternalDependency>> for ExternalTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<ExternalDependency>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ExternalTable> for Vec<ExternalDependency> {
    fn from(table: ExternalTable) -> Self {
        table.entries
    }
}

impl<'a> IntoIterator for &'a ExternalTable {
    type Item = &'a ExternalDependency;
    type IntoIter = std::slice::Iter<'a, ExternalDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
