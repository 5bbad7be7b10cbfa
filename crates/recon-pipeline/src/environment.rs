//! Target environment capabilities
//!
//! Applying manifests is owned by an external collaborator; the pipeline only
//! needs an all-or-nothing answer for the whole set.

use crate::error::ApplyError;
use crate::instance::InstanceIdentity;
use recon_manifest::ManifestDescriptor;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Image parameter name → image reference
pub type ImageParams = BTreeMap<String, String>;

/// Applies a manifest set to the target environment
#[async_trait::async_trait]
pub trait ManifestApplier: Send + Sync {
    /// Apply every descriptor in order
    ///
    /// Succeeds only if the whole set applied.
    async fn apply(
        &self,
        identity: &InstanceIdentity,
        manifests: &[ManifestDescriptor],
        image_params: &ImageParams,
    ) -> Result<(), ApplyError>;
}

/// Handle to the environment a pass applies into
#[derive(Clone)]
pub struct Environment {
    applier: Arc<dyn ManifestApplier>,
}

impl Environment {
    /// Create new environment handle
    #[inline]
    #[must_use]
    pub fn new(applier: Arc<dyn ManifestApplier>) -> Self {
        Self { applier }
    }

    /// Apply capability
    #[inline]
    #[must_use]
    pub fn applier(&self) -> &dyn ManifestApplier {
        self.applier.as_ref()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
