//! Component instances
//!
//! A pipeline is instantiated once per component kind. The instance type
//! supplies the static identity of the kind and the per-instance override
//! request; the rest of its desired state is opaque to the pipeline.

use recon_manifest::DevFlags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desired-state snapshot of one component kind
pub trait ComponentInstance: Send + Sync + 'static {
    /// Component name, also the catalog key and default context directory
    const COMPONENT_NAME: &'static str;

    /// API kind (`FeatureStore`, ...)
    const KIND: &'static str;

    /// Name of this instance
    fn name(&self) -> &str;

    /// Developer override request, if any
    fn dev_flags(&self) -> Option<&DevFlags>;

    /// Identity passed to the apply capability
    fn identity(&self) -> InstanceIdentity {
        InstanceIdentity {
            kind: Self::KIND.to_string(),
            component: Self::COMPONENT_NAME.to_string(),
            name: self.name().to_string(),
        }
    }
}

/// Who a manifest set is applied for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceIdentity {
    /// API kind
    pub kind: String,
    /// Component name
    pub component: String,
    /// Instance name
    pub name: String,
}

impl fmt::Display for InstanceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}
