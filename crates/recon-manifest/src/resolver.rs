//! Developer override resolution
//!
//! Resolution is all-or-nothing: the input descriptor is never touched, and a
//! rewritten copy is only returned once the fetch succeeded.

use crate::descriptor::ManifestDescriptor;
use crate::dev_flags::ManifestOverride;
use crate::fetch::{BundleFetcher, FetchError};
use std::fmt;
use std::sync::Arc;

/// Rewrites a descriptor to point at a developer-supplied bundle
#[derive(Clone)]
pub struct ManifestOverrideResolver {
    component: String,
    fetcher: Arc<dyn BundleFetcher>,
}

impl ManifestOverrideResolver {
    /// Create resolver for one component
    #[inline]
    #[must_use]
    pub fn new(component: impl Into<String>, fetcher: Arc<dyn BundleFetcher>) -> Self {
        Self {
            component: component.into(),
            fetcher,
        }
    }

    /// Resolve `descriptor` against an optional override
    ///
    /// Without an override the descriptor is returned unchanged and no fetch
    /// happens. With one, the bundle is fetched and the copy is moved to the
    /// staging location; the overlay is replaced only when the override names
    /// one.
    ///
    /// # Errors
    /// Returns the fetcher's [`FetchError`] unchanged.
    pub async fn resolve(
        &self,
        request: Option<&ManifestOverride>,
        descriptor: &ManifestDescriptor,
    ) -> Result<ManifestDescriptor, FetchError> {
        let Some(request) = request else {
            return Ok(descriptor.clone());
        };

        tracing::debug!(
            component = %self.component,
            source = %request.uri,
            "fetching override bundle"
        );
        let staged = self.fetcher.fetch(&self.component, &request.uri).await?;

        let mut resolved = descriptor.clone();
        resolved.relocate(staged.base_path, staged.context_dir);
        if let Some(sub_path) = request.sub_path() {
            resolved.set_source_path(sub_path);
        }

        tracing::debug!(component = %self.component, manifest = %resolved, "override resolved");
        Ok(resolved)
    }
}

impl fmt::Debug for ManifestOverrideResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestOverrideResolver")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
