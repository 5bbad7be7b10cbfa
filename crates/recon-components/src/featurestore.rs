//! Feature store component
//!
//! Cluster-scoped singleton named `default-featurestore`. Installs from the
//! `overlays/odh` overlay of the `featurestore` manifest tree.

use crate::meta::ObjectMeta;
use recon_manifest::DevFlags;
use recon_pipeline::{ComponentEntry, ComponentInstance, Condition};
use serde::{Deserialize, Serialize};

/// Component name
pub const COMPONENT_NAME: &str = "featurestore";

/// API kind
pub const KIND: &str = "FeatureStore";

/// Name of the singleton instance
pub const INSTANCE_NAME: &str = "default-featurestore";

/// Overlay applied by default
pub const MANIFESTS_SOURCE_PATH: &str = "overlays/odh";

/// Component label on deployments created by earlier releases. Deployment
/// selectors are immutable, so the old name stays in use.
pub const LEGACY_COMPONENT_NAME: &str = "feature-store-operator";

/// Namespace feature stores are installed into unless configured
pub const DEFAULT_STORES_NAMESPACE: &str = "odh-feature-stores";

fn default_stores_namespace() -> String {
    DEFAULT_STORES_NAMESPACE.to_string()
}

/// Catalog entry: default overlay and image parameters
#[must_use]
pub fn catalog_entry() -> ComponentEntry {
    ComponentEntry::new(COMPONENT_NAME, MANIFESTS_SOURCE_PATH)
        .with_legacy_name(LEGACY_COMPONENT_NAME)
        .with_image("IMAGE_FEATURESTORE", "RELATED_IMAGE_ODH_FEATURE_STORE_IMAGE")
        .with_image(
            "IMAGES_FEATURESTORE_OPERATOR",
            "RELATED_IMAGE_ODH_FEATURE_STORE_OPERATOR_IMAGE",
        )
}

/// Desired state of the feature store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreSpec {
    /// Developer override request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_flags: Option<DevFlags>,
    /// Namespace feature stores are installed into
    #[serde(default = "default_stores_namespace")]
    pub stores_namespace: String,
}

impl Default for FeatureStoreSpec {
    fn default() -> Self {
        Self {
            dev_flags: None,
            stores_namespace: default_stores_namespace(),
        }
    }
}

/// Feature store instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStore {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: FeatureStoreSpec,
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureStore {
    /// The singleton with default spec
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ObjectMeta::named(INSTANCE_NAME),
            spec: FeatureStoreSpec::default(),
        }
    }

    /// Attach developer flags
    #[must_use]
    pub fn with_dev_flags(mut self, dev_flags: DevFlags) -> Self {
        self.spec.dev_flags = Some(dev_flags);
        self
    }
}

impl ComponentInstance for FeatureStore {
    const COMPONENT_NAME: &'static str = COMPONENT_NAME;
    const KIND: &'static str = KIND;

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn dev_flags(&self) -> Option<&DevFlags> {
        self.spec.dev_flags.as_ref()
    }
}

/// Observed state of the feature store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreStatus {
    /// Ready condition of the last pass
    pub conditions: Vec<Condition>,
    /// Namespace the stores were installed into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores_namespace: Option<String>,
}

impl FeatureStoreStatus {
    /// Status after a pass; the namespace is reported once the component is ready
    #[must_use]
    pub fn observe(instance: &FeatureStore, condition: Condition) -> Self {
        let stores_namespace = condition
            .ready
            .then(|| instance.spec.stores_namespace.clone());
        Self {
            conditions: vec![condition],
            stores_namespace,
        }
    }
}
