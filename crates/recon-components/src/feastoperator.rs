//! Feast operator component

use crate::meta::ObjectMeta;
use recon_manifest::DevFlags;
use recon_pipeline::{ComponentEntry, ComponentInstance};
use serde::{Deserialize, Serialize};

/// Component name
pub const COMPONENT_NAME: &str = "feastoperator";

/// API kind
pub const KIND: &str = "FeastOperator";

/// Name of the singleton instance
pub const INSTANCE_NAME: &str = "default-feastoperator";

/// Overlay applied by default
pub const MANIFESTS_SOURCE_PATH: &str = "default";

/// Component label on deployments created by earlier releases
pub const LEGACY_COMPONENT_NAME: &str = "feastoperator";

/// Catalog entry: default overlay and controller image
#[must_use]
pub fn catalog_entry() -> ComponentEntry {
    ComponentEntry::new(COMPONENT_NAME, MANIFESTS_SOURCE_PATH)
        .with_legacy_name(LEGACY_COMPONENT_NAME)
        .with_image(
            "odh-feast-operator-controller-image",
            "RELATED_IMAGE_ODH_FEAST_OPERATOR_IMAGE",
        )
}

/// Desired state of the Feast operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeastOperatorSpec {
    /// Developer override request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_flags: Option<DevFlags>,
}

/// Feast operator instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeastOperator {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Desired state
    #[serde(default)]
    pub spec: FeastOperatorSpec,
}

impl Default for FeastOperator {
    fn default() -> Self {
        Self {
            metadata: ObjectMeta::named(INSTANCE_NAME),
            spec: FeastOperatorSpec::default(),
        }
    }
}

impl ComponentInstance for FeastOperator {
    const COMPONENT_NAME: &'static str = COMPONENT_NAME;
    const KIND: &'static str = KIND;

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn dev_flags(&self) -> Option<&DevFlags> {
        self.spec.dev_flags.as_ref()
    }
}
