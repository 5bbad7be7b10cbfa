//! Runner plus projector: one pass in, one condition out.

use crate::instance::ComponentInstance;
use crate::runner::{PassReport, PipelineRunner};
use crate::status::{Condition, StatusProjector};
use std::sync::Arc;

/// Result of [`Reconciler::reconcile`]
#[derive(Debug)]
pub struct Reconciled<I> {
    /// Pass report, including the resolved manifests
    pub report: PassReport<I>,
    /// Condition to publish
    pub condition: Condition,
}

/// Drives passes for one component kind and projects their status
#[derive(Debug)]
pub struct Reconciler<I: ComponentInstance> {
    runner: PipelineRunner<I>,
    projector: StatusProjector,
}

impl<I: ComponentInstance> Reconciler<I> {
    /// Create reconciler publishing `<Kind>Ready`
    #[inline]
    #[must_use]
    pub fn new(runner: PipelineRunner<I>) -> Self {
        Self::with_projector(runner, StatusProjector::for_kind(I::KIND))
    }

    /// Create reconciler with a custom projector
    #[inline]
    #[must_use]
    pub fn with_projector(runner: PipelineRunner<I>, projector: StatusProjector) -> Self {
        Self { runner, projector }
    }

    /// Underlying runner
    #[inline]
    #[must_use]
    pub fn runner(&self) -> &PipelineRunner<I> {
        &self.runner
    }

    /// Run one pass and project its condition
    pub async fn reconcile(&self, instance: Arc<I>) -> Reconciled<I> {
        let report = self.runner.run(instance).await;
        let condition = self.projector.project(report.outcome());
        tracing::info!(
            kind = I::KIND,
            pass_id = %report.pass_id(),
            ready = condition.ready,
            reason = %condition.reason,
            "condition projected"
        );
        Reconciled { report, condition }
    }
}
