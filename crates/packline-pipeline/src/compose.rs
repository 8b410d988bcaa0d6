//! Pipeline composition.
//!
//! `compose` is the once-per-build entry point. It takes the environment,
//! the project declarations, and the dependency manifest, and produces the
//! immutable `PipelineConfig` the transformation engine consumes. There is
//! no process-wide state: every invocation composes a fresh value, so a
//! watch/rebuild driver can call it repeatedly and idempotently.

use std::path::PathBuf;

use indexmap::IndexMap;
use packline_config::{
    validate_schema, AliasTarget, AssetCategory, BuildEnvironment, ProjectOptions,
};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::external::{resolve_externals, ExternalResolveOptions, ResolvedExternal};
use crate::manifest::DependencyManifest;
use crate::naming::{template_for, FilenameTemplate};
use crate::resolver::ProjectRoot;
use crate::rules::RuleMatcher;

/// Where the engine writes and how output is addressed publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    /// Absolute root directory for build products.
    pub root_dir: PathBuf,
    /// Template for entry chunk names.
    pub filename: FilenameTemplate,
    /// Public base path for the selected environment.
    pub public_base: String,
}

/// An alias after one-time resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedAlias {
    /// Absolute directory under the project root.
    Path(PathBuf),
    /// Package specifier handed to the engine untouched.
    Package(String),
}

/// The terminal artifact: everything the transformation engine needs,
/// composed once and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    pub environment: BuildEnvironment,
    /// Entry points, name to absolute module path, in declaration order.
    pub entry_points: IndexMap<String, PathBuf>,
    pub output: OutputConfig,
    /// Aliases resolved exactly once at composition time.
    pub aliases: IndexMap<String, ResolvedAlias>,
    /// Extensions tried for extensionless imports.
    pub extensions: Vec<String>,
    /// The ordered, compiled rule list.
    pub rules: RuleMatcher,
    /// Resolved external dependencies, in declaration order.
    pub externals: Vec<ResolvedExternal>,
}

/// Compose a pipeline for one build invocation.
///
/// Fails fast: schema validation runs first, and any resolution error
/// aborts composition with no partial config returned.
pub fn compose(
    environment: BuildEnvironment,
    options: &ProjectOptions,
    manifest: &DependencyManifest,
    root: &ProjectRoot,
) -> Result<PipelineConfig> {
    validate_schema(options)?;

    let mut entry_points = IndexMap::with_capacity(options.entries.len());
    for (name, path) in &options.entries {
        entry_points.insert(name.clone(), root.resolve([path])?);
    }

    let mut aliases = IndexMap::with_capacity(options.aliases.len());
    for (name, target) in &options.aliases {
        let resolved = match target {
            AliasTarget::Dir { dir } => ResolvedAlias::Path(root.resolve([dir])?),
            AliasTarget::Package(spec) => ResolvedAlias::Package(spec.clone()),
        };
        aliases.insert(name.clone(), resolved);
    }

    let rules = RuleMatcher::compile_with_policy(
        &options.rules,
        &options.include,
        &options.output.assets_subdir,
        environment,
        root,
        options.unmatched,
    )?;

    let externals = resolve_externals(
        &options.externals,
        environment,
        manifest,
        &ExternalResolveOptions::default(),
    )?;

    let filename = if environment.is_production() {
        template_for(AssetCategory::Script, environment).under(&options.output.assets_subdir)
    } else {
        template_for(AssetCategory::Script, environment)
    };

    let output = OutputConfig {
        root_dir: root.resolve([&options.output.assets_root])?,
        filename,
        public_base: if environment.is_production() {
            options.output.public_path.clone()
        } else {
            options.output.dev_public_path.clone()
        },
    };

    debug!(
        %environment,
        entries = entry_points.len(),
        rules = rules.len(),
        externals = externals.len(),
        "composed pipeline"
    );

    Ok(PipelineConfig {
        environment,
        entry_points,
        output,
        aliases,
        extensions: options.extensions.clone(),
        rules,
        externals,
    })
}
