use recon_manifest::BundleFetcher;
use recon_pipeline::actions::{
    ApplyManifests, Initialize, OverrideManifests, ProcessEnv, ResolveImageParams, VarLookup,
};
use recon_pipeline::{
    CatalogConfig, ComponentInstance, Environment, ManifestApplier, PipelineRunner, Reconciler,
};
use std::fmt;
use std::sync::Arc;

/// External collaborators shared by every component pipeline
#[derive(Clone)]
pub struct Collaborators {
    fetcher: Arc<dyn BundleFetcher>,
    applier: Arc<dyn ManifestApplier>,
    vars: Arc<dyn VarLookup>,
}

impl Collaborators {
    /// Collaborators resolving image parameters from the process environment
    #[must_use]
    pub fn new(fetcher: Arc<dyn BundleFetcher>, applier: Arc<dyn ManifestApplier>) -> Self {
        Self {
            fetcher,
            applier,
            vars: Arc::new(ProcessEnv),
        }
    }

    /// Replace the variable source
    #[must_use]
    pub fn with_vars(mut self, vars: Arc<dyn VarLookup>) -> Self {
        self.vars = vars;
        self
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Pipeline for kind `I`:
/// `initialize → overrideManifests → resolveImageParams → applyManifests`
#[must_use]
pub fn runner<I: ComponentInstance>(
    catalog: Arc<CatalogConfig>,
    collaborators: &Collaborators,
) -> PipelineRunner<I> {
    let environment = Environment::new(Arc::clone(&collaborators.applier));
    PipelineRunner::new(environment)
        .with_action(Initialize::new(Arc::clone(&catalog)))
        .with_action(OverrideManifests::new(Arc::clone(&collaborators.fetcher)))
        .with_action(ResolveImageParams::new(
            catalog,
            Arc::clone(&collaborators.vars),
        ))
        .with_action(ApplyManifests)
}

/// [`runner`] wrapped with the `<Kind>Ready` projector
#[must_use]
pub fn reconciler<I: ComponentInstance>(
    catalog: Arc<CatalogConfig>,
    collaborators: &Collaborators,
) -> Reconciler<I> {
    Reconciler::new(runner(catalog, collaborators))
}
