//! Output filename templates.
//!
//! Templates are small structured values instead of format strings: a
//! directory plus an ordered token list, rendered by a pure function. This
//! keeps the cache-busting scheme in one place and makes template equality
//! testable.

use packline_config::{AssetCategory, BuildEnvironment};
use serde::{Deserialize, Serialize};

/// Length of the content fingerprint embedded in output names.
pub const HASH_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameToken {
    /// The original file stem.
    Stem,
    /// Content fingerprint truncated to this many hex characters.
    Hash(usize),
    /// The original extension, without the dot.
    Ext,
    Literal(String),
}

/// A structured output-name template: `dir/<tokens...>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameTemplate {
    /// Output subdirectory, as a forward-slash URL path segment.
    pub dir: Option<String>,
    pub tokens: Vec<NameToken>,
}

impl FilenameTemplate {
    /// `<subdir>/[name].[hash:7].[ext]`, the cache-busted form used for
    /// every binary asset category.
    pub fn hashed(subdir: &str) -> Self {
        Self {
            dir: Some(subdir.to_string()),
            tokens: vec![
                NameToken::Stem,
                NameToken::Literal(".".to_string()),
                NameToken::Hash(HASH_LEN),
                NameToken::Literal(".".to_string()),
                NameToken::Ext,
            ],
        }
    }

    /// `[name].js`: unfingerprinted entry chunks for fast dev rebuilds.
    pub fn plain_script() -> Self {
        Self {
            dir: None,
            tokens: vec![NameToken::Stem, NameToken::Literal(".js".to_string())],
        }
    }

    /// `js/[name].[hash:7].js`: fingerprinted production entry chunks.
    pub fn hashed_script() -> Self {
        Self {
            dir: Some("js".to_string()),
            tokens: vec![
                NameToken::Stem,
                NameToken::Literal(".".to_string()),
                NameToken::Hash(HASH_LEN),
                NameToken::Literal(".js".to_string()),
            ],
        }
    }

    /// Re-root the template under `base` (e.g. the hashed-assets
    /// subdirectory), keeping the token list untouched.
    pub fn under(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.dir = Some(match self.dir.take() {
            Some(dir) => format!("{base}/{dir}"),
            None => base.to_string(),
        });
        self
    }

    /// Render the template for a concrete file. Pure: the fingerprint is a
    /// function of `content` alone.
    pub fn render(&self, stem: &str, ext: &str, content: &[u8]) -> String {
        let mut out = String::new();
        if let Some(dir) = &self.dir {
            out.push_str(dir);
            out.push('/');
        }
        for token in &self.tokens {
            match token {
                NameToken::Stem => out.push_str(stem),
                NameToken::Hash(len) => out.push_str(&fingerprint(content, *len)),
                NameToken::Ext => out.push_str(ext),
                NameToken::Literal(text) => out.push_str(text),
            }
        }
        out
    }
}

/// First `len` hex characters of the blake3 digest of `content`.
pub fn fingerprint(content: &[u8], len: usize) -> String {
    let mut hex = blake3::hash(content).to_hex().to_string();
    hex.truncate(len);
    hex
}

/// The output-name template for a category under an environment.
///
/// Pure function of its arguments: scripts (and the component templates
/// that compile into them) are fingerprinted only in production, binary
/// assets and stylesheets are fingerprinted in both environments.
pub fn template_for(category: AssetCategory, environment: BuildEnvironment) -> FilenameTemplate {
    match category {
        AssetCategory::Script | AssetCategory::ComponentTemplate => {
            if environment.is_production() {
                FilenameTemplate::hashed_script()
            } else {
                FilenameTemplate::plain_script()
            }
        }
        // subdir() is total for the remaining categories
        other => FilenameTemplate::hashed(other.subdir().unwrap_or("assets")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_pure_functions_of_their_arguments() {
        for category in AssetCategory::ALL {
            for environment in [BuildEnvironment::Development, BuildEnvironment::Production] {
                assert_eq!(
                    template_for(category, environment),
                    template_for(category, environment)
                );
            }
        }
    }

    #[test]
    fn dev_scripts_skip_the_fingerprint() {
        let template = template_for(AssetCategory::Script, BuildEnvironment::Development);
        assert_eq!(template.render("app", "js", b"console.log(1)"), "app.js");
    }

    #[test]
    fn production_scripts_are_fingerprinted_under_js() {
        let template = template_for(AssetCategory::Script, BuildEnvironment::Production);
        let name = template.render("app", "js", b"console.log(1)");
        assert!(name.starts_with("js/app."));
        assert!(name.ends_with(".js"));
        let hash = &name["js/app.".len()..name.len() - ".js".len()];
        assert_eq!(hash.len(), HASH_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn images_render_with_a_seven_char_hash() {
        let template = template_for(AssetCategory::Image, BuildEnvironment::Production);
        let name = template.render("logo", "png", b"fake png bytes");
        assert!(name.starts_with("img/logo."));
        assert!(name.ends_with(".png"));
        let hash = &name["img/logo.".len()..name.len() - ".png".len()];
        assert_eq!(hash.len(), HASH_LEN);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = fingerprint(b"one", HASH_LEN);
        let b = fingerprint(b"one", HASH_LEN);
        let c = fingerprint(b"two", HASH_LEN);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), HASH_LEN);
    }

    #[test]
    fn under_prefixes_the_directory() {
        let template = FilenameTemplate::hashed("img").under("static");
        assert_eq!(template.dir.as_deref(), Some("static/img"));
        let template = FilenameTemplate::plain_script().under("static");
        assert_eq!(template.dir.as_deref(), Some("static"));
    }
}
