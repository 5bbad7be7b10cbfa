//! Per-pass reconciliation context
//!
//! Built fresh by the runner at the start of every pass and dropped (or handed
//! back read-only in the report) at the end. Nothing survives between passes.

use crate::environment::{Environment, ImageParams};
use crate::instance::ComponentInstance;
use recon_manifest::ManifestDescriptor;
use std::fmt;
use std::sync::Arc;

/// Mutable state threaded through the actions of one pass
pub struct ReconciliationContext<I> {
    instance: Arc<I>,
    manifests: Vec<ManifestDescriptor>,
    image_params: ImageParams,
    environment: Environment,
}

impl<I: ComponentInstance> ReconciliationContext<I> {
    /// Create empty context for `instance`
    #[must_use]
    pub fn new(instance: Arc<I>, environment: Environment) -> Self {
        Self {
            instance,
            manifests: Vec::new(),
            image_params: ImageParams::new(),
            environment,
        }
    }

    /// Instance snapshot for this pass
    #[inline]
    #[must_use]
    pub fn instance(&self) -> &I {
        &self.instance
    }

    /// Manifests in apply order
    #[inline]
    #[must_use]
    pub fn manifests(&self) -> &[ManifestDescriptor] {
        &self.manifests
    }

    /// Append a manifest
    #[inline]
    pub fn push_manifest(&mut self, manifest: ManifestDescriptor) {
        self.manifests.push(manifest);
    }

    /// First manifest, the only one eligible for override
    #[inline]
    #[must_use]
    pub fn primary_manifest(&self) -> Option<&ManifestDescriptor> {
        self.manifests.first()
    }

    /// Replace the first manifest; returns false when none is registered
    pub fn replace_primary_manifest(&mut self, manifest: ManifestDescriptor) -> bool {
        match self.manifests.first_mut() {
            Some(slot) => {
                *slot = manifest;
                true
            }
            None => false,
        }
    }

    /// Resolved image parameters
    #[inline]
    #[must_use]
    pub fn image_params(&self) -> &ImageParams {
        &self.image_params
    }

    /// Record an image parameter
    #[inline]
    pub fn set_image_param(&mut self, param: impl Into<String>, image: impl Into<String>) {
        self.image_params.insert(param.into(), image.into());
    }

    /// Environment the pass applies into
    #[inline]
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl<I> fmt::Debug for ReconciliationContext<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconciliationContext")
            .field("manifests", &self.manifests)
            .field("image_params", &self.image_params)
            .finish_non_exhaustive()
    }
}
