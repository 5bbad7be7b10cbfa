use super::OVERRIDE_MANIFESTS;
use crate::action::Action;
use crate::context::ReconciliationContext;
use crate::error::{ActionError, ConfigurationError};
use crate::instance::ComponentInstance;
use recon_manifest::{BundleFetcher, DevFlags, ManifestOverrideResolver};
use std::fmt;
use std::sync::Arc;

/// Applies the instance's developer override to the primary manifest
///
/// Only the first registered manifest is eligible; any others are left as
/// initialized.
#[derive(Clone)]
pub struct OverrideManifests {
    fetcher: Arc<dyn BundleFetcher>,
}

impl OverrideManifests {
    /// Create step fetching override bundles through `fetcher`
    #[inline]
    #[must_use]
    pub fn new(fetcher: Arc<dyn BundleFetcher>) -> Self {
        Self { fetcher }
    }
}

impl fmt::Debug for OverrideManifests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideManifests").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<I: ComponentInstance> Action<I> for OverrideManifests {
    fn name(&self) -> &'static str {
        OVERRIDE_MANIFESTS
    }

    async fn apply(&self, context: &mut ReconciliationContext<I>) -> Result<(), ActionError> {
        let Some(request) = context
            .instance()
            .dev_flags()
            .and_then(DevFlags::primary)
            .cloned()
        else {
            tracing::debug!("no manifest override requested");
            return Ok(());
        };

        let Some(primary) = context.primary_manifest() else {
            return Err(
                ConfigurationError::NoManifestToOverride(I::COMPONENT_NAME.to_string()).into(),
            );
        };

        let resolver = ManifestOverrideResolver::new(I::COMPONENT_NAME, Arc::clone(&self.fetcher));
        let resolved = resolver.resolve(Some(&request), primary).await?;

        tracing::info!(source = %request.uri, manifest = %resolved, "using override manifests");
        context.replace_primary_manifest(resolved);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, FixedFetcher, TestInstance};
    use recon_manifest::{FetchError, ManifestDescriptor, ManifestOverride, StagedBundle};

    fn seeded(instance: TestInstance) -> ReconciliationContext<TestInstance> {
        let mut ctx = context(instance);
        ctx.push_manifest(ManifestDescriptor::new("/manifests", "widget", "overlays/odh"));
        ctx.push_manifest(ManifestDescriptor::new("/manifests", "widget-extra", "default"));
        ctx
    }

    #[tokio::test]
    async fn no_dev_flags_is_noop() {
        let fetcher = FixedFetcher::ok(StagedBundle::new("/tmp/stage", "widget"));
        let mut ctx = seeded(TestInstance::plain());
        let before = ctx.manifests().to_vec();

        Action::<TestInstance>::apply(&OverrideManifests::new(fetcher.clone()), &mut ctx)
            .await
            .unwrap();

        assert_eq!(ctx.manifests(), before.as_slice());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn empty_manifest_list_is_noop() {
        let fetcher = FixedFetcher::ok(StagedBundle::new("/tmp/stage", "widget"));
        let mut ctx = seeded(TestInstance::with_dev_flags(DevFlags::default()));

        Action::<TestInstance>::apply(&OverrideManifests::new(fetcher.clone()), &mut ctx)
            .await
            .unwrap();

        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn only_primary_manifest_is_rewritten() {
        let fetcher = FixedFetcher::ok(StagedBundle::new("/tmp/stage", "widget"));
        let flags = DevFlags::with_override(
            ManifestOverride::new("git://x@rev".parse().unwrap()).with_source_path("overlays/dev"),
        );
        let mut ctx = seeded(TestInstance::with_dev_flags(flags));

        Action::<TestInstance>::apply(&OverrideManifests::new(fetcher), &mut ctx)
            .await
            .unwrap();

        assert_eq!(
            ctx.manifests(),
            &[
                ManifestDescriptor::new("/tmp/stage", "widget", "overlays/dev"),
                ManifestDescriptor::new("/manifests", "widget-extra", "default"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_error_propagates_verbatim() {
        let fetcher = FixedFetcher::err(FetchError::unreachable("unreachable"));
        let flags = DevFlags::with_override(ManifestOverride::new("git://x@rev".parse().unwrap()));
        let mut ctx = seeded(TestInstance::with_dev_flags(flags));
        let before = ctx.manifests().to_vec();

        let err = Action::<TestInstance>::apply(&OverrideManifests::new(fetcher), &mut ctx)
            .await
            .unwrap_err();

        assert_eq!(err, ActionError::Fetch(FetchError::unreachable("unreachable")));
        assert_eq!(ctx.manifests(), before.as_slice());
    }

    #[tokio::test]
    async fn override_without_manifest_is_configuration_error() {
        let fetcher = FixedFetcher::ok(StagedBundle::new("/tmp/stage", "widget"));
        let flags = DevFlags::with_override(ManifestOverride::new("git://x@rev".parse().unwrap()));
        let mut ctx = context(TestInstance::with_dev_flags(flags));

        let err = Action::<TestInstance>::apply(&OverrideManifests::new(fetcher.clone()), &mut ctx)
            .await
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(fetcher.calls(), 0);
    }
}
