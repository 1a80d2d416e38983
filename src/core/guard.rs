//! Guard predicates for controlling state transitions.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition may leave a phase.
///
/// Guards are shared (`Arc`) so transitions carrying them stay cheap to
/// clone.
///
/// # Example
///
/// ```rust
/// use ledgergate::core::Guard;
/// use ledgergate::gate::RotationPhase;
///
/// let only_when_idle = Guard::new(|p: &RotationPhase| matches!(p, RotationPhase::Idle));
///
/// assert!(only_when_idle.check(&RotationPhase::Idle));
/// assert!(!only_when_idle.check(&RotationPhase::FadingOut));
/// ```
pub struct Guard<S: State> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure, thread-safe predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows leaving `state`.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
