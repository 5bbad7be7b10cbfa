//! Testing utilities for the recon workspace
//!
//! Recording stubs for the fetch and apply capabilities, a step counter
//! action, and a minimal component kind.

#![allow(missing_docs)]

use parking_lot::Mutex;
use recon_manifest::{
    BundleFetcher, DevFlags, FetchError, ManifestDescriptor, ManifestOverride, SourceReference,
    StagedBundle,
};
use recon_pipeline::{
    Action, ActionError, ApplyError, CatalogConfig, ComponentEntry, ComponentInstance,
    ImageParams, InstanceIdentity, ManifestApplier, ReconciliationContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fetcher returning a preset result and recording every call
#[derive(Debug)]
pub struct StubFetcher {
    result: Mutex<Result<StagedBundle, FetchError>>,
    calls: Mutex<Vec<(String, SourceReference)>>,
}

impl StubFetcher {
    pub fn succeeding(base_path: &str, context_dir: &str) -> Arc<Self> {
        Self::with_result(Ok(StagedBundle::new(base_path, context_dir)))
    }

    pub fn failing(error: FetchError) -> Arc<Self> {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<StagedBundle, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn set_result(&self, result: Result<StagedBundle, FetchError>) {
        *self.result.lock() = result;
    }

    pub fn calls(&self) -> Vec<(String, SourceReference)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait::async_trait]
impl BundleFetcher for StubFetcher {
    async fn fetch(
        &self,
        component: &str,
        reference: &SourceReference,
    ) -> Result<StagedBundle, FetchError> {
        self.calls
            .lock()
            .push((component.to_string(), reference.clone()));
        self.result.lock().clone()
    }
}

/// One recorded apply call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSet {
    pub identity: InstanceIdentity,
    pub manifests: Vec<ManifestDescriptor>,
    pub image_params: ImageParams,
}

/// Applier returning a preset result and recording every call
#[derive(Debug)]
pub struct StubApplier {
    result: Mutex<Result<(), ApplyError>>,
    applied: Mutex<Vec<AppliedSet>>,
}

impl StubApplier {
    pub fn succeeding() -> Arc<Self> {
        Self::with_result(Ok(()))
    }

    pub fn failing(error: ApplyError) -> Arc<Self> {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<(), ApplyError>) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
            applied: Mutex::new(Vec::new()),
        })
    }

    pub fn set_result(&self, result: Result<(), ApplyError>) {
        *self.result.lock() = result;
    }

    pub fn applied(&self) -> Vec<AppliedSet> {
        self.applied.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.applied.lock().len()
    }
}

#[async_trait::async_trait]
impl ManifestApplier for StubApplier {
    async fn apply(
        &self,
        identity: &InstanceIdentity,
        manifests: &[ManifestDescriptor],
        image_params: &ImageParams,
    ) -> Result<(), ApplyError> {
        self.applied.lock().push(AppliedSet {
            identity: identity.clone(),
            manifests: manifests.to_vec(),
            image_params: image_params.clone(),
        });
        self.result.lock().clone()
    }
}

/// Step that counts its invocations and optionally fails
#[derive(Debug, Clone)]
pub struct CountingAction {
    name: &'static str,
    invocations: Arc<AtomicUsize>,
    failure: Option<ActionError>,
}

impl CountingAction {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            invocations: Arc::new(AtomicUsize::new(0)),
            failure: None,
        }
    }

    pub fn failing(name: &'static str, error: impl Into<ActionError>) -> Self {
        Self {
            failure: Some(error.into()),
            ..Self::new(name)
        }
    }

    /// Shared counter; clone it before handing the action to a runner
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.invocations)
    }
}

#[async_trait::async_trait]
impl<I: ComponentInstance> Action<I> for CountingAction {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn apply(&self, _context: &mut ReconciliationContext<I>) -> Result<(), ActionError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Minimal component kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Widget {
    pub dev_flags: Option<DevFlags>,
}

impl Widget {
    pub const NAME: &'static str = "default-widget";

    pub fn with_override(uri: &str, sub_path: Option<&str>) -> Self {
        let mut manifest = ManifestOverride::new(parse_reference(uri));
        if let Some(sub_path) = sub_path {
            manifest = manifest.with_source_path(sub_path);
        }
        Self {
            dev_flags: Some(DevFlags::with_override(manifest)),
        }
    }
}

impl ComponentInstance for Widget {
    const COMPONENT_NAME: &'static str = "widget";
    const KIND: &'static str = "Widget";

    fn name(&self) -> &str {
        Self::NAME
    }

    fn dev_flags(&self) -> Option<&DevFlags> {
        self.dev_flags.as_ref()
    }
}

/// Catalog holding the widget entry under `root`
pub fn widget_catalog(root: &str) -> Arc<CatalogConfig> {
    Arc::new(CatalogConfig::new(root).with_component(
        Widget::COMPONENT_NAME,
        ComponentEntry::new(Widget::COMPONENT_NAME, "overlays/odh")
            .with_image("IMAGE_WIDGET", "RELATED_IMAGE_WIDGET"),
    ))
}

pub fn parse_reference(uri: &str) -> SourceReference {
    uri.parse()
        .unwrap_or_else(|e| panic!("invalid test reference {uri}: {e}"))
}
