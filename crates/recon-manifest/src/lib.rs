//! Recon Manifest
//!
//! Locating the manifest bundles a component is installed from:
//! - [`ManifestDescriptor`]: where a bundle lives (base path, context directory, overlay)
//! - [`SourceReference`]: locator of an alternate bundle (`<location>[@<revision>]`)
//! - [`DevFlags`]: the developer override request carried by a component instance
//! - [`BundleFetcher`]: capability that stages a remote bundle locally
//! - [`ManifestOverrideResolver`]: rewrites a descriptor to point at a staged bundle
//!
//! # Example
//!
//! ```rust,ignore
//! use recon_manifest::{ManifestDescriptor, ManifestOverrideResolver};
//!
//! let descriptor = ManifestDescriptor::new("/opt/manifests", "featurestore", "overlays/odh");
//! let resolver = ManifestOverrideResolver::new("featurestore", fetcher);
//! let resolved = resolver.resolve(dev_flags.primary(), &descriptor).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod descriptor;
mod dev_flags;
mod fetch;
mod local;
mod resolver;
mod source;

pub use descriptor::ManifestDescriptor;
pub use dev_flags::{DevFlags, ManifestOverride};
pub use fetch::{BundleFetcher, FetchError, FetchFailureKind, StagedBundle};
pub use local::LocalBundleFetcher;
pub use resolver::ManifestOverrideResolver;
pub use source::{SourceReference, SourceReferenceError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
