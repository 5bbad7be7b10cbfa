//! Pipeline actions
//!
//! An action is one named step of a pass. It reads and mutates the context
//! and must be safe to run again from scratch on the next pass.

use crate::context::ReconciliationContext;
use crate::error::ActionError;
use crate::instance::ComponentInstance;

/// One step of a reconciliation pass
#[async_trait::async_trait]
pub trait Action<I: ComponentInstance>: Send + Sync {
    /// Fixed name, published as the condition reason when the step fails
    fn name(&self) -> &'static str;

    /// Run the step
    async fn apply(&self, context: &mut ReconciliationContext<I>) -> Result<(), ActionError>;
}
