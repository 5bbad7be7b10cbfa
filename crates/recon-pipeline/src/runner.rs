//! Pipeline runner
//!
//! Executes an ordered list of actions against a fresh context. The first
//! failing step ends the pass; later steps never run. There is no resume: the
//! next pass starts again at step 0 with a new context.
//!
//! The runner places no timeout on actions. Callers that need a deadline wrap
//! [`PipelineRunner::run`] (e.g. `tokio::time::timeout`) and drop the future
//! on expiry; the abandoned context is discarded without rollback.

use crate::action::Action;
use crate::actions::{ApplyManifests, Initialize, OverrideManifests};
use crate::config::CatalogConfig;
use crate::context::ReconciliationContext;
use crate::environment::{Environment, ImageParams};
use crate::error::ActionError;
use crate::instance::ComponentInstance;
use crate::state::{PassState, PassTracker};
use recon_manifest::{BundleFetcher, ManifestDescriptor};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Unique pass identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassId(pub Uuid);

impl PassId {
    /// Generate new pass ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal outcome of a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every step completed
    Succeeded,
    /// A step failed and the pass stopped there
    Failed(StepFailure),
}

impl PassOutcome {
    /// Check if the pass succeeded
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Failure details, if the pass failed
    #[inline]
    #[must_use]
    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Succeeded => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// The step that ended a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Position of the step in the pipeline
    pub index: usize,
    /// Step name
    pub step: &'static str,
    /// Error returned by the step
    pub error: ActionError,
}

/// Result of one pass
///
/// Keeps the finished context so the resolved manifests can be audited.
/// The context is only reachable through read accessors.
pub struct PassReport<I> {
    pass_id: PassId,
    outcome: PassOutcome,
    history: Vec<PassState>,
    context: ReconciliationContext<I>,
}

impl<I: ComponentInstance> PassReport<I> {
    /// Pass identifier
    #[inline]
    #[must_use]
    pub fn pass_id(&self) -> PassId {
        self.pass_id
    }

    /// Terminal outcome
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &PassOutcome {
        &self.outcome
    }

    /// States the pass moved through, starting at `Pending`
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[PassState] {
        &self.history
    }

    /// Final state
    #[must_use]
    pub fn final_state(&self) -> PassState {
        self.history.last().copied().unwrap_or(PassState::Pending)
    }

    /// Manifests as resolved by the pass
    #[inline]
    #[must_use]
    pub fn manifests(&self) -> &[ManifestDescriptor] {
        self.context.manifests()
    }

    /// Image parameters as resolved by the pass
    #[inline]
    #[must_use]
    pub fn image_params(&self) -> &ImageParams {
        self.context.image_params()
    }

    /// Take the outcome, dropping the context
    #[inline]
    #[must_use]
    pub fn into_outcome(self) -> PassOutcome {
        self.outcome
    }
}

impl<I> fmt::Debug for PassReport<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassReport")
            .field("pass_id", &self.pass_id)
            .field("outcome", &self.outcome)
            .field("history", &self.history)
            .field("context", &self.context)
            .finish()
    }
}

/// Ordered action pipeline for one component kind
pub struct PipelineRunner<I: ComponentInstance> {
    actions: Vec<Box<dyn Action<I>>>,
    environment: Environment,
}

impl<I: ComponentInstance> PipelineRunner<I> {
    /// Create runner with no steps
    #[inline]
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            actions: Vec::new(),
            environment,
        }
    }

    /// `initialize → overrideManifests → applyManifests`
    #[must_use]
    pub fn standard(
        environment: Environment,
        catalog: Arc<CatalogConfig>,
        fetcher: Arc<dyn BundleFetcher>,
    ) -> Self {
        Self::new(environment)
            .with_action(Initialize::new(catalog))
            .with_action(OverrideManifests::new(fetcher))
            .with_action(ApplyManifests)
    }

    /// Append a step
    #[inline]
    #[must_use]
    pub fn with_action<A: Action<I> + 'static>(mut self, action: A) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Step names in execution order
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the pipeline has no steps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run one pass for `instance`
    pub async fn run(&self, instance: Arc<I>) -> PassReport<I> {
        let pass_id = PassId::new();
        let span = tracing::info_span!(
            "reconcile",
            kind = I::KIND,
            instance = %instance.name(),
            pass_id = %pass_id,
        );
        self.execute(pass_id, instance).instrument(span).await
    }

    async fn execute(&self, pass_id: PassId, instance: Arc<I>) -> PassReport<I> {
        let mut tracker = PassTracker::new();
        let mut context = ReconciliationContext::new(instance, self.environment.clone());

        for (index, action) in self.actions.iter().enumerate() {
            let step = action.name();
            tracker.advance(PassState::Running(index));
            tracing::debug!(step, index, "step started");

            if let Err(error) = action.apply(&mut context).await {
                tracing::warn!(
                    step,
                    index,
                    error = %error,
                    retryable = error.is_retryable(),
                    "pass failed"
                );
                tracker.advance(PassState::Failed(index));
                return PassReport {
                    pass_id,
                    outcome: PassOutcome::Failed(StepFailure { index, step, error }),
                    history: tracker.into_history(),
                    context,
                };
            }

            tracing::debug!(step, index, "step completed");
        }

        tracker.advance(PassState::Succeeded);
        tracing::info!(manifests = context.manifests().len(), "pass succeeded");
        PassReport {
            pass_id,
            outcome: PassOutcome::Succeeded,
            history: tracker.into_history(),
            context,
        }
    }
}

impl<I: ComponentInstance> fmt::Debug for PipelineRunner<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("steps", &self.step_names())
            .finish_non_exhaustive()
    }
}
