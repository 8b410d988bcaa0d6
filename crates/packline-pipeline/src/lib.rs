//! Composition engine for the packline asset pipeline.
//!
//! Takes the declarations from `packline-config` and composes them, once
//! per build invocation, into an immutable [`PipelineConfig`]: anchored
//! entry points, per-category output-name templates, the ordered transform
//! rule list, one-time-resolved aliases, and the resolved external
//! dependency table. The actual file reading, transforming, and writing is
//! the transformation engine's job; this crate only does path and string
//! computation.

pub mod compose;
pub mod error;
pub mod external;
pub mod manifest;
pub mod naming;
pub mod resolver;
pub mod routes;
pub mod rules;

#[cfg(feature = "logging")]
pub mod logging;

// Re-export main types
pub use compose::{compose, OutputConfig, PipelineConfig, ResolvedAlias};
pub use error::{PipelineError, Result};
pub use external::{
    resolve_externals, ExternalResolveOptions, ResolvedExternal, DEV_MOUNT, PROD_URL_TEMPLATE,
};
pub use manifest::DependencyManifest;
pub use naming::{fingerprint, template_for, FilenameTemplate, NameToken, HASH_LEN};
pub use resolver::ProjectRoot;
pub use routes::{Route, RouteTable};
pub use rules::{PlanStep, RuleMatcher, TransformPlan};
