//! Readiness status projection
//!
//! A pass outcome becomes exactly one condition. The projection is pure: the
//! same outcome always yields the same condition, and nothing is merged with
//! the previous value. Transition timestamps belong to whoever stores it.

use crate::runner::PassOutcome;
use serde::{Deserialize, Serialize};

/// Suffix of the per-kind ready condition type
pub const READY_SUFFIX: &str = "Ready";

/// Reason published when every step succeeded
pub const REASON_APPLIED: &str = "Applied";

/// Externally observable readiness record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type, e.g. `FeatureStoreReady`
    #[serde(rename = "type")]
    pub condition_type: String,
    /// Whether the component is ready
    pub ready: bool,
    /// Machine-readable reason: `Applied`, or the failing step's name
    pub reason: String,
    /// Failure detail; absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    /// Kubernetes-style status string
    #[inline]
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.ready {
            "True"
        } else {
            "False"
        }
    }
}

/// Turns pass outcomes into conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusProjector {
    condition_type: String,
}

impl StatusProjector {
    /// Create projector publishing under `condition_type`
    #[inline]
    #[must_use]
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
        }
    }

    /// Projector publishing `<kind>Ready`
    #[inline]
    #[must_use]
    pub fn for_kind(kind: &str) -> Self {
        Self::new(format!("{kind}{READY_SUFFIX}"))
    }

    /// Condition type
    #[inline]
    #[must_use]
    pub fn condition_type(&self) -> &str {
        &self.condition_type
    }

    /// Project an outcome
    #[must_use]
    pub fn project(&self, outcome: &PassOutcome) -> Condition {
        match outcome {
            PassOutcome::Succeeded => Condition {
                condition_type: self.condition_type.clone(),
                ready: true,
                reason: REASON_APPLIED.to_string(),
                message: None,
            },
            PassOutcome::Failed(failure) => Condition {
                condition_type: self.condition_type.clone(),
                ready: false,
                reason: failure.step.to_string(),
                message: Some(failure.error.detail()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ActionError, ApplyError};
    use crate::runner::StepFailure;

    #[test]
    fn success_is_applied() {
        let condition = StatusProjector::for_kind("FeatureStore").project(&PassOutcome::Succeeded);
        assert_eq!(
            condition,
            Condition {
                condition_type: "FeatureStoreReady".into(),
                ready: true,
                reason: "Applied".into(),
                message: None,
            }
        );
        assert_eq!(condition.status(), "True");
    }

    #[test]
    fn failure_names_step_and_carries_detail() {
        let outcome = PassOutcome::Failed(StepFailure {
            index: 2,
            step: "applyManifests",
            error: ActionError::Apply(ApplyError::transient("the object has been modified")),
        });

        let condition = StatusProjector::for_kind("FeatureStore").project(&outcome);
        assert!(!condition.ready);
        assert_eq!(condition.reason, "applyManifests");
        assert_eq!(condition.message.as_deref(), Some("the object has been modified"));
        assert_eq!(condition.status(), "False");
    }

    #[test]
    fn serializes_with_type_key() {
        let condition = StatusProjector::new("FeastOperatorReady").project(&PassOutcome::Succeeded);
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["type"], "FeastOperatorReady");
        assert!(json.get("message").is_none());
    }
}
