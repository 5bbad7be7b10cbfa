//! Developer override request
//!
//! Instances may carry `devFlags.manifests`, a list of alternate bundles. Only
//! the first entry is honoured: one override target per component per pass.

use crate::source::SourceReference;
use serde::{Deserialize, Serialize};

/// Developer flags attached to a component instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevFlags {
    /// Alternate manifest bundles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<ManifestOverride>,
}

impl DevFlags {
    /// Flags overriding the primary manifest
    #[must_use]
    pub fn with_override(manifest: ManifestOverride) -> Self {
        Self {
            manifests: vec![manifest],
        }
    }

    /// The override applied to the primary manifest, if any
    #[inline]
    #[must_use]
    pub fn primary(&self) -> Option<&ManifestOverride> {
        self.manifests.first()
    }
}

/// One alternate manifest bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestOverride {
    /// Where to fetch the bundle from
    pub uri: SourceReference,
    /// Overlay to apply from the fetched bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl ManifestOverride {
    /// Override that keeps the current overlay
    #[inline]
    #[must_use]
    pub fn new(uri: SourceReference) -> Self {
        Self {
            uri,
            source_path: None,
        }
    }

    /// Also select an overlay
    #[inline]
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Overlay override; an empty string counts as unset
    #[inline]
    #[must_use]
    pub fn sub_path(&self) -> Option<&str> {
        self.source_path.as_deref().filter(|p| !p.is_empty())
    }
}
