//! Recon Components
//!
//! Concrete component kinds reconciled by the pipeline:
//! - [`FeatureStore`]: the feature store service (`featurestore`)
//! - [`FeastOperator`]: the Feast operator (`feastoperator`)
//!
//! Each kind gets its own pipeline instance; there is no runtime dispatch on
//! the instance type.
//!
//! # Example
//!
//! ```rust,ignore
//! use recon_components::{default_catalog, reconciler, Collaborators, FeatureStore};
//!
//! let collaborators = Collaborators::new(fetcher, applier);
//! let reconciler = reconciler::<FeatureStore>(Arc::new(default_catalog()), &collaborators);
//! let reconciled = reconciler.reconcile(Arc::new(FeatureStore::new())).await;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod feastoperator;
pub mod featurestore;

mod catalog;
mod meta;
mod pipeline;

pub use catalog::{catalog_with_root, default_catalog};
pub use feastoperator::FeastOperator;
pub use featurestore::{FeatureStore, FeatureStoreSpec, FeatureStoreStatus};
pub use meta::ObjectMeta;
pub use pipeline::{reconciler, runner, Collaborators};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
