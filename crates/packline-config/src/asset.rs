//! Asset category definitions.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Inline-vs-emit threshold for binary assets, in bytes.
///
/// An asset strictly below the limit is inlined as a data reference; at or
/// above it the asset is emitted as a separate output file. The value and
/// the strict comparison are load-bearing for output compatibility.
pub const INLINE_LIMIT: u64 = 10_000;

/// The mutually exclusive asset categories the rule list is written in
/// terms of. A file belongs to at most one category, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetCategory {
    /// Plain script modules.
    Script,
    /// Single-file component templates, compiled into script modules.
    ComponentTemplate,
    /// Stylesheets.
    Style,
    Image,
    Media,
    Font,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 6] = [
        AssetCategory::Script,
        AssetCategory::ComponentTemplate,
        AssetCategory::Style,
        AssetCategory::Image,
        AssetCategory::Media,
        AssetCategory::Font,
    ];

    /// Extensions owned by this category. The sets are disjoint, which is
    /// what keeps categories mutually exclusive.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Script => &["js"],
            Self::ComponentTemplate => &["vue"],
            Self::Style => &["css"],
            Self::Image => &["png", "jpg", "jpeg", "gif", "svg"],
            Self::Media => &["mp4", "webm", "ogg", "mp3", "wav", "flac", "aac"],
            Self::Font => &["woff", "woff2", "eot", "ttf", "otf"],
        }
    }

    /// Output subdirectory for emitted files of this category, relative to
    /// the hashed-assets subdirectory. Component templates compile away
    /// into scripts and never emit under their own directory.
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            Self::Script => Some("js"),
            Self::Style => Some("css"),
            Self::Image => Some("img"),
            Self::Media => Some("media"),
            Self::Font => Some("fonts"),
            Self::ComponentTemplate => None,
        }
    }

    /// Classify a path by extension. A query suffix (`logo.png?inline`)
    /// does not affect classification.
    pub fn of_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let name = name.split('?').next().unwrap_or(name);
        let (_, ext) = name.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&ext.as_str()))
    }

    /// Binary categories are subject to the inline-vs-emit decision.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Image | Self::Media | Self::Font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(
            AssetCategory::of_path(Path::new("src/main.js")),
            Some(AssetCategory::Script)
        );
        assert_eq!(
            AssetCategory::of_path(Path::new("src/components/WikiPage.vue")),
            Some(AssetCategory::ComponentTemplate)
        );
        assert_eq!(
            AssetCategory::of_path(Path::new("assets/logo.PNG")),
            Some(AssetCategory::Image)
        );
        assert_eq!(
            AssetCategory::of_path(Path::new("assets/intro.mp4")),
            Some(AssetCategory::Media)
        );
        assert_eq!(
            AssetCategory::of_path(Path::new("fonts/icons.woff2")),
            Some(AssetCategory::Font)
        );
    }

    #[test]
    fn query_suffix_does_not_change_the_category() {
        assert_eq!(
            AssetCategory::of_path(Path::new("assets/logo.png?inline")),
            Some(AssetCategory::Image)
        );
    }

    #[test]
    fn unknown_extensions_are_uncategorized() {
        assert_eq!(AssetCategory::of_path(Path::new("README.md")), None);
        assert_eq!(AssetCategory::of_path(Path::new("Makefile")), None);
    }

    #[test]
    fn extension_sets_are_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for category in AssetCategory::ALL {
            for ext in category.extensions() {
                assert!(seen.insert(*ext), "{ext} claimed by two categories");
            }
        }
    }

    #[test]
    fn binary_categories_have_subdirs() {
        for category in AssetCategory::ALL {
            if category.is_binary() {
                assert!(category.subdir().is_some());
            }
        }
    }
}
