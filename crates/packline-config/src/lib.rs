//! Declaration layer for the packline asset pipeline.
//!
//! Everything a project declares lives here: the build environment selector,
//! asset categories, the ordered transform rule list, the external dependency
//! table, and the project-level options that tie them together. The
//! `packline-pipeline` crate composes these declarations into an immutable
//! pipeline configuration.

pub mod asset;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod external;
pub mod project;
pub mod rules;
pub mod settings;
pub mod validation;

// Re-export main types
pub use asset::{AssetCategory, INLINE_LIMIT};
pub use environment::BuildEnvironment;
pub use error::{ConfigError, Result};
pub use external::{ExternalDependency, ExternalTable};
pub use project::{AliasTarget, OutputOptions, ProjectOptions};
pub use rules::{RuleDecl, RuleSet, UnmatchedPolicy};
pub use settings::GlobalSettings;

// Re-export discovery and validation
pub use discovery::{discover, ConfigDiscovery};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
