//! Pass state machine
//!
//! `Pending → Running(0) → … → Running(n) → Succeeded | Failed(i)`.
//! Terminal states have no outgoing transitions; a new pass starts over at
//! `Pending` with a fresh context.

use crate::error::TransitionError;

/// Lifecycle state of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassState {
    /// Not started
    Pending,
    /// Executing step `i`
    Running(usize),
    /// Every step completed
    Succeeded,
    /// Step `i` failed; later steps were skipped
    Failed(usize),
}

impl PassState {
    /// Check if no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// Validates a state transition.
///
/// Illegal transitions panic with the `strict-debug` feature; otherwise the
/// error is returned.
pub fn validate_transition(from: PassState, to: PassState) -> Result<(), TransitionError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("Illegal pass transition attempted: {from:?} -> {to:?}");

        Err(TransitionError { from, to })
    }
}

/// States reachable from `from`
///
/// `Pending → Succeeded` covers a pipeline with no steps.
#[must_use]
pub fn allowed_transitions(from: PassState) -> Vec<PassState> {
    use PassState::{Failed, Pending, Running, Succeeded};
    match from {
        Pending => vec![Running(0), Succeeded],
        Running(i) => vec![Running(i + 1), Failed(i), Succeeded],
        Succeeded | Failed(_) => vec![],
    }
}

/// Records the states a pass moved through
#[derive(Debug, Clone)]
pub(crate) struct PassTracker {
    current: PassState,
    history: Vec<PassState>,
}

impl PassTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: PassState::Pending,
            history: vec![PassState::Pending],
        }
    }

    pub(crate) fn advance(&mut self, next: PassState) {
        if let Err(err) = validate_transition(self.current, next) {
            tracing::error!(from = ?self.current, to = ?next, "{err}");
        }
        self.current = next;
        self.history.push(next);
    }

    pub(crate) fn into_history(self) -> Vec<PassState> {
        self.history
    }
}
