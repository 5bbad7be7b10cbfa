//! Manifest descriptors
//!
//! A [`ManifestDescriptor`] names one manifest tree: the shared staging root,
//! the component's own directory under it, and the overlay inside that
//! directory which is actually applied.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Location of a manifest bundle
///
/// The context directory is fixed at construction. Only the override
/// resolver may move a descriptor to another staging location; everything
/// else can change the overlay through [`ManifestDescriptor::set_source_path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDescriptor {
    base_path: PathBuf,
    context_dir: String,
    source_path: String,
}

impl ManifestDescriptor {
    /// Create new descriptor
    #[inline]
    #[must_use]
    pub fn new(
        base_path: impl Into<PathBuf>,
        context_dir: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            context_dir: context_dir.into(),
            source_path: source_path.into(),
        }
    }

    /// Root under which manifest trees are staged
    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Component directory under the base path
    #[inline]
    #[must_use]
    pub fn context_dir(&self) -> &str {
        &self.context_dir
    }

    /// Overlay applied from the context directory
    #[inline]
    #[must_use]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Select another overlay
    #[inline]
    pub fn set_source_path(&mut self, source_path: impl Into<String>) {
        self.source_path = source_path.into();
    }

    /// Full path of the overlay that gets applied
    #[must_use]
    pub fn full_path(&self) -> PathBuf {
        self.base_path
            .join(&self.context_dir)
            .join(&self.source_path)
    }

    /// Point the descriptor at a freshly staged bundle.
    pub(crate) fn relocate(&mut self, base_path: PathBuf, context_dir: String) {
        self.base_path = base_path;
        self.context_dir = context_dir;
    }
}

impl Display for ManifestDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path().display())
    }
}
