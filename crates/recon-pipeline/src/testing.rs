//! Stubs shared by this crate's unit tests.

use crate::context::ReconciliationContext;
use crate::environment::{Environment, ImageParams, ManifestApplier};
use crate::error::ApplyError;
use crate::instance::{ComponentInstance, InstanceIdentity};
use parking_lot::Mutex;
use recon_manifest::{
    BundleFetcher, DevFlags, FetchError, ManifestDescriptor, SourceReference, StagedBundle,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct TestInstance {
    dev_flags: Option<DevFlags>,
}

impl TestInstance {
    pub(crate) fn plain() -> Self {
        Self { dev_flags: None }
    }

    pub(crate) fn with_dev_flags(dev_flags: DevFlags) -> Self {
        Self {
            dev_flags: Some(dev_flags),
        }
    }
}

impl ComponentInstance for TestInstance {
    const COMPONENT_NAME: &'static str = "widget";
    const KIND: &'static str = "Widget";

    fn name(&self) -> &str {
        "default-widget"
    }

    fn dev_flags(&self) -> Option<&DevFlags> {
        self.dev_flags.as_ref()
    }
}

pub(crate) struct FixedFetcher {
    result: Result<StagedBundle, FetchError>,
    calls: AtomicUsize,
}

impl FixedFetcher {
    pub(crate) fn ok(staged: StagedBundle) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(staged),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn err(error: FetchError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BundleFetcher for FixedFetcher {
    async fn fetch(
        &self,
        _component: &str,
        _reference: &SourceReference,
    ) -> Result<StagedBundle, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

type AppliedSet = (InstanceIdentity, Vec<ManifestDescriptor>, ImageParams);

pub(crate) struct RecordingApplier {
    result: Result<(), ApplyError>,
    calls: Mutex<Vec<AppliedSet>>,
}

impl RecordingApplier {
    pub(crate) fn ok() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn err(error: ApplyError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<AppliedSet> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl ManifestApplier for RecordingApplier {
    async fn apply(
        &self,
        identity: &InstanceIdentity,
        manifests: &[ManifestDescriptor],
        image_params: &ImageParams,
    ) -> Result<(), ApplyError> {
        self.calls
            .lock()
            .push((identity.clone(), manifests.to_vec(), image_params.clone()));
        self.result.clone()
    }
}

pub(crate) fn environment() -> Environment {
    Environment::new(RecordingApplier::ok())
}

pub(crate) fn context(instance: TestInstance) -> ReconciliationContext<TestInstance> {
    ReconciliationContext::new(Arc::new(instance), environment())
}

pub(crate) fn context_with(
    instance: TestInstance,
    applier: Arc<RecordingApplier>,
) -> ReconciliationContext<TestInstance> {
    ReconciliationContext::new(Arc::new(instance), Environment::new(applier))
}
