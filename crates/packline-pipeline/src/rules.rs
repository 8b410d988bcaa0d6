//! Ordered rule matching.
//!
//! Declared rules are compiled once per composition against the project
//! root and environment. Matching walks the compiled list in declaration
//! order: side-effect-only pre-stages (lint) accumulate ahead of the chain,
//! and the first full primary match for the file's category wins; later
//! rules for the same category are never consulted.

use std::path::{Path, PathBuf};

use packline_config::{AssetCategory, BuildEnvironment, RuleDecl, RuleSet, UnmatchedPolicy};
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::naming::{template_for, FilenameTemplate};
use crate::resolver::ProjectRoot;

/// One step of a transformer chain, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum PlanStep {
    /// Side-effect-only lint pass.
    Lint,
    /// Compile a single-file component template into a script module.
    CompileTemplate,
    /// Transpile a script for the target platform.
    Transpile,
    /// Inline the file into its referrer as a data reference.
    InlineData,
    /// Emit the file under the rendered template name.
    EmitFile { template: FilenameTemplate },
    /// Copy the file to the output tree unmodified.
    CopyVerbatim,
}

/// Ordered transformer chain for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformPlan {
    pub steps: Vec<PlanStep>,
}

impl TransformPlan {
    pub fn is_copy(&self) -> bool {
        matches!(self.steps.as_slice(), [PlanStep::CopyVerbatim])
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
enum CompiledKind {
    Lint { include: Vec<PathBuf> },
    ComponentTemplate,
    ScriptTranspile { include: Vec<PathBuf> },
    AssetUrl {
        category: AssetCategory,
        limit: u64,
        template: FilenameTemplate,
    },
}

/// A rule compiled against a concrete project root and environment.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledRule {
    kind: CompiledKind,
}

/// The ordered, compiled rule list plus the unmatched-file policy, anchored
/// at the root it was compiled against.
#[derive(Debug, Clone, Serialize)]
pub struct RuleMatcher {
    rules: Vec<CompiledRule>,
    unmatched: UnmatchedPolicy,
    root: ProjectRoot,
}

impl RuleMatcher {
    /// Compile declared rules. Rule-level include lists override the
    /// project-level one; both are resolved against the root here, never
    /// again per file. Asset templates are re-rooted under
    /// `assets_subdir`.
    pub fn compile(
        rules: &RuleSet,
        default_include: &[PathBuf],
        assets_subdir: &str,
        environment: BuildEnvironment,
        root: &ProjectRoot,
    ) -> Result<Self> {
        Self::compile_with_policy(
            rules,
            default_include,
            assets_subdir,
            environment,
            root,
            UnmatchedPolicy::default(),
        )
    }

    pub fn compile_with_policy(
        rules: &RuleSet,
        default_include: &[PathBuf],
        assets_subdir: &str,
        environment: BuildEnvironment,
        root: &ProjectRoot,
        unmatched: UnmatchedPolicy,
    ) -> Result<Self> {
        let default_include = resolve_dirs(default_include, root)?;

        let mut compiled = Vec::with_capacity(rules.len());
        for decl in rules.iter() {
            let kind = match decl {
                RuleDecl::Lint { include } => CompiledKind::Lint {
                    include: pick_include(include, &default_include, root)?,
                },
                RuleDecl::ComponentTemplate => CompiledKind::ComponentTemplate,
                RuleDecl::ScriptTranspile { include } => CompiledKind::ScriptTranspile {
                    include: pick_include(include, &default_include, root)?,
                },
                RuleDecl::AssetUrl { category, limit } => CompiledKind::AssetUrl {
                    category: *category,
                    limit: *limit,
                    template: template_for(*category, environment).under(assets_subdir),
                },
            };
            compiled.push(CompiledRule { kind });
        }

        Ok(Self {
            rules: compiled,
            unmatched,
            root: root.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the transformer chain for one input file of `size` bytes.
    ///
    /// A relative `path` is anchored at the project root before matching,
    /// so include checks behave the same either way; a path outside the
    /// root fails with `InvalidPath`. Binary assets strictly below the
    /// rule's limit are inlined; at or above it they are emitted under the
    /// category template. A file no rule matches is copied verbatim or,
    /// under `UnmatchedPolicy::Fail`, aborts composition.
    pub fn plan_for(&self, path: &Path, size: u64) -> Result<TransformPlan> {
        let path = self.root.resolve([path])?;
        let path = path.as_path();
        let category = AssetCategory::of_path(path);
        let mut steps = Vec::new();
        let mut matched_primary = false;

        for rule in &self.rules {
            match &rule.kind {
                CompiledKind::Lint { include } => {
                    let lintable = matches!(
                        category,
                        Some(AssetCategory::Script | AssetCategory::ComponentTemplate)
                    );
                    if lintable && within(include, path) {
                        steps.push(PlanStep::Lint);
                    }
                }
                CompiledKind::ComponentTemplate => {
                    if !matched_primary && category == Some(AssetCategory::ComponentTemplate) {
                        steps.push(PlanStep::CompileTemplate);
                        matched_primary = true;
                    }
                }
                CompiledKind::ScriptTranspile { include } => {
                    if !matched_primary
                        && category == Some(AssetCategory::Script)
                        && within(include, path)
                    {
                        steps.push(PlanStep::Transpile);
                        matched_primary = true;
                    }
                }
                CompiledKind::AssetUrl {
                    category: rule_category,
                    limit,
                    template,
                } => {
                    if !matched_primary && category == Some(*rule_category) {
                        steps.push(if size < *limit {
                            PlanStep::InlineData
                        } else {
                            PlanStep::EmitFile {
                                template: template.clone(),
                            }
                        });
                        matched_primary = true;
                    }
                }
            }
        }

        if !matched_primary {
            match self.unmatched {
                UnmatchedPolicy::CopyVerbatim => steps.push(PlanStep::CopyVerbatim),
                UnmatchedPolicy::Fail => {
                    return Err(PipelineError::UnknownAssetCategory {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        Ok(TransformPlan { steps })
    }
}

fn resolve_dirs(dirs: &[PathBuf], root: &ProjectRoot) -> Result<Vec<PathBuf>> {
    dirs.iter().map(|dir| root.resolve([dir])).collect()
}

fn pick_include(
    own: &[PathBuf],
    default_include: &[PathBuf],
    root: &ProjectRoot,
) -> Result<Vec<PathBuf>> {
    if own.is_empty() {
        Ok(default_include.to_vec())
    } else {
        resolve_dirs(own, root)
    }
}

/// An empty include set applies everywhere.
fn within(include: &[PathBuf], path: &Path) -> bool {
    include.is_empty() || include.iter().any(|dir| path.starts_with(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use packline_config::INLINE_LIMIT;
    use std::path::Path;

    fn matcher(unmatched: UnmatchedPolicy) -> RuleMatcher {
        let root = ProjectRoot::new("/project");
        RuleMatcher::compile_with_policy(
            &RuleSet::reference(),
            &[PathBuf::from("src"), PathBuf::from("test")],
            "static",
            BuildEnvironment::Production,
            &root,
            unmatched,
        )
        .unwrap()
    }

    #[test]
    fn scripts_in_src_get_lint_then_transpile() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/src/main.js"), 1_234)
            .unwrap();
        assert_eq!(plan.steps, vec![PlanStep::Lint, PlanStep::Transpile]);
    }

    #[test]
    fn component_templates_get_lint_then_compile() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/src/components/WikiPage.vue"), 5_000)
            .unwrap();
        assert_eq!(plan.steps, vec![PlanStep::Lint, PlanStep::CompileTemplate]);
    }

    #[test]
    fn small_images_are_inlined() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/src/assets/logo.png"), INLINE_LIMIT - 1)
            .unwrap();
        assert_eq!(plan.steps, vec![PlanStep::InlineData]);
    }

    #[test]
    fn images_at_the_threshold_are_emitted() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/src/assets/logo.png"), INLINE_LIMIT)
            .unwrap();
        match &plan.steps[..] {
            [PlanStep::EmitFile { template }] => {
                assert_eq!(template.dir.as_deref(), Some("static/img"));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn first_full_match_per_category_wins() {
        let root = ProjectRoot::new("/project");
        let rules = RuleSet(vec![
            RuleDecl::AssetUrl {
                category: AssetCategory::Image,
                limit: 1,
            },
            RuleDecl::AssetUrl {
                category: AssetCategory::Image,
                limit: 1_000_000,
            },
        ]);
        let matcher = RuleMatcher::compile(
            &rules,
            &[],
            "static",
            BuildEnvironment::Production,
            &root,
        )
        .unwrap();
        // The first image rule matched, so its limit governs: 500 >= 1 emits
        // even though the later rule would have inlined.
        let plan = matcher
            .plan_for(Path::new("/project/src/a.png"), 500)
            .unwrap();
        assert!(matches!(plan.steps[..], [PlanStep::EmitFile { .. }]));
    }

    #[test]
    fn relative_paths_are_anchored_before_matching() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("src/main.js"), 1_234)
            .unwrap();
        assert_eq!(plan.steps, vec![PlanStep::Lint, PlanStep::Transpile]);
    }

    #[test]
    fn paths_outside_the_root_are_rejected() {
        let result =
            matcher(UnmatchedPolicy::CopyVerbatim).plan_for(Path::new("/elsewhere/a.png"), 10);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::InvalidPath { .. }
        ));
    }

    #[test]
    fn scripts_outside_the_include_dirs_are_not_linted_or_transpiled() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/vendor/lib.js"), 10)
            .unwrap();
        assert_eq!(plan.steps, vec![PlanStep::CopyVerbatim]);
    }

    #[test]
    fn unmatched_files_copy_verbatim_by_default() {
        let plan = matcher(UnmatchedPolicy::CopyVerbatim)
            .plan_for(Path::new("/project/src/README.md"), 10)
            .unwrap();
        assert!(plan.is_copy());
    }

    #[test]
    fn unmatched_files_fail_under_the_strict_policy() {
        let result =
            matcher(UnmatchedPolicy::Fail).plan_for(Path::new("/project/src/README.md"), 10);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::UnknownAssetCategory { .. }
        ));
    }
}
