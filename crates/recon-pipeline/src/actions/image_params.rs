use super::RESOLVE_IMAGE_PARAMS;
use crate::action::Action;
use crate::config::CatalogConfig;
use crate::context::ReconciliationContext;
use crate::error::ActionError;
use crate::instance::ComponentInstance;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Source of environment variables
pub trait VarLookup: Send + Sync {
    /// Value of `name`, if set and non-empty
    fn var(&self, name: &str) -> Option<String>;
}

/// Process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl VarLookup for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

/// Resolves the component's image table against the environment
///
/// Parameters whose variable is unset are skipped so the manifests keep their
/// built-in image.
#[derive(Clone)]
pub struct ResolveImageParams {
    catalog: Arc<CatalogConfig>,
    vars: Arc<dyn VarLookup>,
}

impl ResolveImageParams {
    /// Create step reading image tables from `catalog`
    #[inline]
    #[must_use]
    pub fn new(catalog: Arc<CatalogConfig>, vars: Arc<dyn VarLookup>) -> Self {
        Self { catalog, vars }
    }
}

impl fmt::Debug for ResolveImageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveImageParams").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl<I: ComponentInstance> Action<I> for ResolveImageParams {
    fn name(&self) -> &'static str {
        RESOLVE_IMAGE_PARAMS
    }

    async fn apply(&self, context: &mut ReconciliationContext<I>) -> Result<(), ActionError> {
        let entry = self.catalog.component(I::COMPONENT_NAME)?;
        for (param, var) in &entry.images {
            match self.vars.var(var) {
                Some(image) => context.set_image_param(param.clone(), image),
                None => tracing::debug!(param = %param, var = %var, "image variable unset"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentEntry;
    use crate::testing::{context, TestInstance};

    fn catalog() -> Arc<CatalogConfig> {
        Arc::new(
            CatalogConfig::new("/manifests").with_component(
                "widget",
                ComponentEntry::new("widget", "default")
                    .with_image("IMAGE_WIDGET", "RELATED_IMAGE_WIDGET")
                    .with_image("IMAGE_WIDGET_OPERATOR", "RELATED_IMAGE_WIDGET_OPERATOR"),
            ),
        )
    }

    #[tokio::test]
    async fn resolves_set_variables_only() {
        let vars: BTreeMap<String, String> = [
            ("RELATED_IMAGE_WIDGET".to_string(), "quay.io/widget:1".to_string()),
            ("RELATED_IMAGE_WIDGET_OPERATOR".to_string(), String::new()),
        ]
        .into_iter()
        .collect();
        let mut ctx = context(TestInstance::plain());

        Action::<TestInstance>::apply(&ResolveImageParams::new(catalog(), Arc::new(vars)), &mut ctx)
            .await
            .unwrap();

        assert_eq!(ctx.image_params().len(), 1);
        assert_eq!(
            ctx.image_params().get("IMAGE_WIDGET").map(String::as_str),
            Some("quay.io/widget:1")
        );
    }

    #[tokio::test]
    async fn missing_entry_is_configuration_error() {
        let step =
            ResolveImageParams::new(Arc::new(CatalogConfig::default()), Arc::new(ProcessEnv));
        let mut ctx = context(TestInstance::plain());

        let err = Action::<TestInstance>::apply(&step, &mut ctx).await.unwrap_err();
        assert!(err.is_fatal());
    }
}
