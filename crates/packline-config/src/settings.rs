//! Global settings shared by the tooling around the pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Log level for the composing process (`error` .. `debug`).
    #[serde(default)]
    pub log_level: Option<String>,

    /// Variables injected into entry-point code at build time.
    #[serde(default)]
    pub environment: HashMap<String, String>,
}
