//! Phase transitions with effectful actions.

use crate::core::{Guard, State};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;

/// Result of executing a transition action.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionResult<S: State> {
    /// Move to the new phase
    Success(S),

    /// Outcome failed; move to the error phase
    Abort { reason: String, error_state: S },
}

/// Errors that can occur during transitions
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("No transition available from state '{from}'")]
    NoTransition { from: String },

    #[error("Transition action failed: {0}")]
    ActionFailed(String),
}

/// Factory producing a fresh effect for every execution of a transition.
pub type TransitionAction<S, Env> =
    Arc<dyn Fn() -> BoxedEffect<TransitionResult<S>, TransitionError, Env> + Send + Sync>;

/// A transition from one phase to another with an effectful action.
pub struct Transition<S: State, Env> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<S>>,
    pub action: TransitionAction<S, Env>,
}

impl<S: State, Env> Transition<S, Env> {
    /// Whether this transition applies to `current` (pure).
    pub fn can_execute(&self, current: &S) -> bool {
        if *current != self.from {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(current))
    }
}

impl<S: State, Env> Clone for Transition<S, Env> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            action: Arc::clone(&self.action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GatePhase;
    use stillwater::prelude::*;

    fn idle_to_submitting(guard: Option<Guard<GatePhase>>) -> Transition<GatePhase, ()> {
        Transition {
            from: GatePhase::Idle,
            to: GatePhase::Submitting,
            guard,
            action: Arc::new(|| pure(TransitionResult::Success(GatePhase::Submitting)).boxed()),
        }
    }

    #[test]
    fn can_execute_matches_from_phase() {
        let transition = idle_to_submitting(None);

        assert!(transition.can_execute(&GatePhase::Idle));
        assert!(!transition.can_execute(&GatePhase::Submitting));
        assert!(!transition.can_execute(&GatePhase::Accepted));
    }

    #[test]
    fn can_execute_respects_guard() {
        let blocked = idle_to_submitting(Some(Guard::new(|_: &GatePhase| false)));
        assert!(!blocked.can_execute(&GatePhase::Idle));

        let open = idle_to_submitting(Some(Guard::new(|p: &GatePhase| !p.is_final())));
        assert!(open.can_execute(&GatePhase::Idle));
    }

    #[test]
    fn cloned_transition_keeps_endpoints() {
        let transition = idle_to_submitting(None);
        let cloned = transition.clone();

        assert_eq!(cloned.from, GatePhase::Idle);
        assert_eq!(cloned.to, GatePhase::Submitting);
    }
}
