//! Built-in actions
//!
//! The standard pass is `initialize → overrideManifests → applyManifests`;
//! `resolveImageParams` can be slotted in before the apply step.

mod apply_manifests;
mod image_params;
mod initialize;
mod override_manifests;

pub use apply_manifests::ApplyManifests;
pub use image_params::{ProcessEnv, ResolveImageParams, VarLookup};
pub use initialize::Initialize;
pub use override_manifests::OverrideManifests;

/// Name of the initialize step
pub const INITIALIZE: &str = "initialize";
/// Name of the developer override step
pub const OVERRIDE_MANIFESTS: &str = "overrideManifests";
/// Name of the image parameter step
pub const RESOLVE_IMAGE_PARAMS: &str = "resolveImageParams";
/// Name of the apply step
pub const APPLY_MANIFESTS: &str = "applyManifests";
