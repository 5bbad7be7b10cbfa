use super::APPLY_MANIFESTS;
use crate::action::Action;
use crate::context::ReconciliationContext;
use crate::error::ActionError;
use crate::instance::ComponentInstance;

/// Applies the full manifest set through the environment's applier
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyManifests;

#[async_trait::async_trait]
impl<I: ComponentInstance> Action<I> for ApplyManifests {
    fn name(&self) -> &'static str {
        APPLY_MANIFESTS
    }

    async fn apply(&self, context: &mut ReconciliationContext<I>) -> Result<(), ActionError> {
        let identity = context.instance().identity();
        tracing::debug!(
            target_instance = %identity,
            manifests = context.manifests().len(),
            "applying manifests"
        );

        context
            .environment()
            .applier()
            .apply(&identity, context.manifests(), context.image_params())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplyError;
    use crate::testing::{context_with, RecordingApplier, TestInstance};
    use recon_manifest::ManifestDescriptor;

    #[tokio::test]
    async fn hands_whole_set_to_applier() {
        let applier = RecordingApplier::ok();
        let mut ctx = context_with(TestInstance::plain(), applier.clone());
        ctx.push_manifest(ManifestDescriptor::new("/manifests", "widget", "overlays/odh"));
        ctx.push_manifest(ManifestDescriptor::new("/manifests", "widget-extra", "default"));
        ctx.set_image_param("IMAGE_WIDGET", "quay.io/widget:1");

        Action::<TestInstance>::apply(&ApplyManifests, &mut ctx).await.unwrap();

        let calls = applier.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.name, "default-widget");
        assert_eq!(calls[0].1.len(), 2);
        assert_eq!(calls[0].2.get("IMAGE_WIDGET").map(String::as_str), Some("quay.io/widget:1"));
    }

    #[tokio::test]
    async fn apply_error_carries_tool_diagnostic() {
        let applier = RecordingApplier::err(ApplyError::permanent("admission webhook denied"));
        let mut ctx = context_with(TestInstance::plain(), applier);

        let err = Action::<TestInstance>::apply(&ApplyManifests, &mut ctx)
            .await
            .unwrap_err();

        assert_eq!(err.detail(), "admission webhook denied");
        assert!(!err.is_retryable());
    }
}
