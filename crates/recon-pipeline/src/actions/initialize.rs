use super::INITIALIZE;
use crate::action::Action;
use crate::config::CatalogConfig;
use crate::context::ReconciliationContext;
use crate::error::ActionError;
use crate::instance::ComponentInstance;
use std::sync::Arc;

/// Registers the component's default manifest
#[derive(Debug, Clone)]
pub struct Initialize {
    catalog: Arc<CatalogConfig>,
}

impl Initialize {
    /// Create step reading defaults from `catalog`
    #[inline]
    #[must_use]
    pub fn new(catalog: Arc<CatalogConfig>) -> Self {
        Self { catalog }
    }
}

#[async_trait::async_trait]
impl<I: ComponentInstance> Action<I> for Initialize {
    fn name(&self) -> &'static str {
        INITIALIZE
    }

    async fn apply(&self, context: &mut ReconciliationContext<I>) -> Result<(), ActionError> {
        let manifest = self.catalog.default_manifest(I::COMPONENT_NAME)?;
        tracing::debug!(manifest = %manifest, "registered default manifest");
        context.push_manifest(manifest);
        Ok(())
    }
}
