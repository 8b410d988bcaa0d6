//! External dependency resolution.
//!
//! Each table entry resolves to the run-time references the transformation
//! engine needs: a script reference (CDN URL in production, local package
//! mount in development), an optional stylesheet reference, an optional
//! global binding shim, and the bundler exclusion that keeps the package's
//! source out of the bundle. Styles-only entries contribute exactly one
//! stylesheet reference and nothing else.

use packline_config::{BuildEnvironment, ExternalDependency, ExternalTable};
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::manifest::DependencyManifest;

/// Production base URL template. `:name`, `:version` and `:path` are
/// interpolated per entry; the version comes from the dependency manifest.
pub const PROD_URL_TEMPLATE: &str = "//cdnjs.cloudflare.com/ajax/libs/:name/:version/:path";

/// Filesystem mount serving package distributions in development.
pub const DEV_MOUNT: &str = "/node_modules";

/// Knobs for the mapper; defaults reproduce the reference behavior.
#[derive(Debug, Clone)]
pub struct ExternalResolveOptions {
    pub prod_url: String,
    pub dev_mount: String,
}

impl Default for ExternalResolveOptions {
    fn default() -> Self {
        Self {
            prod_url: PROD_URL_TEMPLATE.to_string(),
            dev_mount: DEV_MOUNT.to_string(),
        }
    }
}

/// One fully resolved external dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedExternal {
    pub name: String,

    /// Script reference; absent for styles-only entries.
    pub script: Option<String>,

    /// Stylesheet reference.
    pub style: Option<String>,

    /// Global binding shim exposing the library to entry-point code.
    pub global: Option<String>,

    /// Package name the engine must exclude from bundled output; absent for
    /// styles-only entries, which ship no script.
    pub exclude: Option<String>,
}

/// Resolve the whole table for one environment. Order is preserved; the
/// first error aborts resolution.
pub fn resolve_externals(
    table: &ExternalTable,
    environment: BuildEnvironment,
    manifest: &DependencyManifest,
    options: &ExternalResolveOptions,
) -> Result<Vec<ResolvedExternal>> {
    table
        .iter()
        .map(|entry| resolve_entry(entry, environment, manifest, options))
        .collect()
}

fn resolve_entry(
    entry: &ExternalDependency,
    environment: BuildEnvironment,
    manifest: &DependencyManifest,
    options: &ExternalResolveOptions,
) -> Result<ResolvedExternal> {
    let style = match entry.styles.as_deref() {
        Some(styles) => Some(reference_for(entry, styles, environment, manifest, options)?),
        None => None,
    };

    if entry.styles_only {
        let style = style.ok_or_else(|| PipelineError::UnresolvableExternal {
            name: entry.name.clone(),
            reason: "styles-only entry declares no stylesheet path".to_string(),
        })?;
        return Ok(ResolvedExternal {
            name: entry.name.clone(),
            script: None,
            style: Some(style),
            global: None,
            exclude: None,
        });
    }

    let dist_path =
        entry
            .dist_path
            .as_deref()
            .ok_or_else(|| PipelineError::UnresolvableExternal {
                name: entry.name.clone(),
                reason: "no distribution path declared".to_string(),
            })?;
    let script = reference_for(entry, dist_path, environment, manifest, options)?;

    Ok(ResolvedExternal {
        name: entry.name.clone(),
        script: Some(script),
        style,
        global: entry.global.clone(),
        exclude: Some(entry.name.clone()),
    })
}

/// Synthesize one remote or local reference for a file within the entry's
/// distribution.
fn reference_for(
    entry: &ExternalDependency,
    dist_path: &str,
    environment: BuildEnvironment,
    manifest: &DependencyManifest,
    options: &ExternalResolveOptions,
) -> Result<String> {
    match environment {
        BuildEnvironment::Production => {
            let version = manifest.version_of(&entry.name).ok_or_else(|| {
                PipelineError::UnresolvableExternal {
                    name: entry.name.clone(),
                    reason: "dependency manifest declares no version".to_string(),
                }
            })?;
            Ok(options
                .prod_url
                .replace(":name", entry.registry_name())
                .replace(":version", version)
                .replace(":path", dist_path))
        }
        BuildEnvironment::Development => Ok(format!(
            "{}/{}/{}",
            options.dev_mount.trim_end_matches('/'),
            entry.name,
            dist_path
        )),
    }
}
