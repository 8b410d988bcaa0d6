//! Project-root anchored path resolution.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Anchors every project-relative path at a fixed root.
///
/// Resolution is pure path arithmetic: nothing is read from disk and no
/// symlinks are followed.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// Anchor at `root`. Callers pass an absolute directory; the root is
    /// normalized but never re-resolved afterwards.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into().clean(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Join `segments` onto the root and normalize the result.
    ///
    /// An absolute segment restarts resolution, which makes the operation
    /// associative: `resolve([resolve([a, b])?, c])` equals
    /// `resolve([a, b, c])`. Traversal that escapes the root fails with
    /// `InvalidPath`.
    pub fn resolve<I, S>(&self, segments: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut joined = self.root.clone();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_absolute() {
                joined = segment.to_path_buf();
            } else {
                joined.push(segment);
            }
        }

        let resolved = joined.clean();
        if !resolved.starts_with(&self.root) {
            return Err(PipelineError::InvalidPath { path: resolved });
        }
        Ok(resolved)
    }
}
