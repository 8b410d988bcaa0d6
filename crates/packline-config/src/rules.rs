//! Transform rule declarations.
//!
//! Rules form an explicit ordered list of tagged variants, one variant per
//! pipeline concern. Declaration order is the total order the matcher walks:
//! the side-effect-only lint stage comes first, then the primary transformer
//! for each category. The matcher applies the first full primary match per
//! category and ignores later rules for the same category.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetCategory, INLINE_LIMIT};

/// One declared rule. `include` lists on lint/transpile rules are
/// project-relative directories; an empty list inherits the project-level
/// include set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleDecl {
    /// Side-effect-only lint pass over scripts and component templates.
    Lint {
        #[serde(default)]
        include: Vec<PathBuf>,
    },
    /// Compile single-file component templates into script modules.
    ComponentTemplate,
    /// Transpile scripts within the project sources.
    ScriptTranspile {
        #[serde(default)]
        include: Vec<PathBuf>,
    },
    /// Route a binary asset category through the inline-or-emit decision.
    AssetUrl {
        category: AssetCategory,
        #[serde(default = "default_limit")]
        limit: u64,
    },
}

fn default_limit() -> u64 {
    INLINE_LIMIT
}

/// Ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(pub Vec<RuleDecl>);

impl RuleSet {
    /// The canonical SPA pipeline: lint first, component templates, script
    /// transpilation, then one url rule per binary category.
    pub fn reference() -> Self {
        Self(vec![
            RuleDecl::Lint { include: vec![] },
            RuleDecl::ComponentTemplate,
            RuleDecl::ScriptTranspile { include: vec![] },
            RuleDecl::AssetUrl {
                category: AssetCategory::Image,
                limit: INLINE_LIMIT,
            },
            RuleDecl::AssetUrl {
                category: AssetCategory::Media,
                limit: INLINE_LIMIT,
            },
            RuleDecl::AssetUrl {
                category: AssetCategory::Font,
                limit: INLINE_LIMIT,
            },
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleDecl> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::reference()
    }
}

/// What to do with a file no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedPolicy {
    /// Copy the file to the output tree unmodified.
    #[default]
    CopyVerbatim,
    /// Abort composition when a file matches no rule.
    Fail,
}
