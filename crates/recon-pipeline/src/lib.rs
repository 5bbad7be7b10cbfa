//! Recon Pipeline
//!
//! Ordered-action reconciliation for pluggable components:
//! 1. **Run**: a fresh [`ReconciliationContext`] is threaded through a fixed
//!    list of [`Action`]s, stopping at the first failure
//! 2. **Project**: the terminal [`PassOutcome`] becomes one readiness [`Condition`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recon_pipeline::prelude::*;
//!
//! let runner = PipelineRunner::<FeatureStore>::standard(environment, catalog, fetcher);
//! let reconciler = Reconciler::new(runner);
//!
//! let reconciled = reconciler.reconcile(instance).await;
//! publish(reconciled.condition);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod actions;
pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod instance;
pub mod reconciler;
pub mod runner;
pub mod state;
pub mod status;
pub mod telemetry;

#[cfg(test)]
mod testing;

// Re-exports
pub use action::Action;
pub use config::{CatalogConfig, ComponentEntry, DEFAULT_MANIFEST_ROOT};
pub use context::ReconciliationContext;
pub use environment::{Environment, ImageParams, ManifestApplier};
pub use error::{
    ActionError, ApplyError, ApplyFailureKind, ConfigurationError, TelemetryError,
    TransitionError,
};
pub use instance::{ComponentInstance, InstanceIdentity};
pub use reconciler::{Reconciled, Reconciler};
pub use runner::{PassId, PassOutcome, PassReport, PipelineRunner, StepFailure};
pub use state::PassState;
pub use status::{Condition, StatusProjector, READY_SUFFIX, REASON_APPLIED};

/// Common imports for building and running pipelines
pub mod prelude {
    pub use crate::actions::{
        ApplyManifests, Initialize, OverrideManifests, ProcessEnv, ResolveImageParams, VarLookup,
    };
    pub use crate::{
        Action, ActionError, CatalogConfig, ComponentEntry, ComponentInstance, Condition,
        Environment, ManifestApplier, PassOutcome, PipelineRunner, ReconciliationContext,
        Reconciler, StatusProjector,
    };
    pub use recon_manifest::{BundleFetcher, DevFlags, ManifestDescriptor, ManifestOverride};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
