//! Timestamped record of phase transitions.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single phase transition.
///
/// # Example
///
/// ```rust
/// use ledgergate::core::StateTransition;
/// use ledgergate::gate::GatePhase;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: GatePhase::Idle,
///     to: GatePhase::Submitting,
///     timestamp: Utc::now(),
///     attempt: 1,
/// };
/// assert_eq!(transition.to, GatePhase::Submitting);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Submission or rotation number this transition belongs to
    pub attempt: usize,
}

/// Ordered history of phase transitions.
///
/// `record` returns a new history and leaves the receiver untouched; the
/// machines keep only the latest value.
///
/// # Example
///
/// ```rust
/// use ledgergate::core::{StateHistory, StateTransition};
/// use ledgergate::gate::RotationPhase;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: RotationPhase::Idle,
///         to: RotationPhase::FadingOut,
///         timestamp: Utc::now(),
///         attempt: 1,
///     })
///     .record(StateTransition {
///         from: RotationPhase::FadingOut,
///         to: RotationPhase::Swapping,
///         timestamp: Utc::now(),
///         attempt: 1,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&RotationPhase::Idle, &RotationPhase::FadingOut, &RotationPhase::Swapping]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Phases traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Number of transitions that entered `phase`.
    pub fn count_entries(&self, phase: &S) -> usize {
        self.transitions.iter().filter(|t| &t.to == phase).count()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GatePhase;

    fn step(from: GatePhase, to: GatePhase) -> StateTransition<GatePhase> {
        StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            attempt: 1,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<GatePhase> = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
    }

    #[test]
    fn record_leaves_original_untouched() {
        let history = StateHistory::new();
        let next = history.record(step(GatePhase::Idle, GatePhase::Submitting));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(next.transitions().len(), 1);
    }

    #[test]
    fn path_follows_rejected_submission() {
        let history = StateHistory::new()
            .record(step(GatePhase::Idle, GatePhase::Submitting))
            .record(step(GatePhase::Submitting, GatePhase::Rejected))
            .record(step(GatePhase::Rejected, GatePhase::Idle));

        assert_eq!(
            history.get_path(),
            vec![
                &GatePhase::Idle,
                &GatePhase::Submitting,
                &GatePhase::Rejected,
                &GatePhase::Idle
            ]
        );
        assert_eq!(history.count_entries(&GatePhase::Idle), 1);
        assert_eq!(history.count_entries(&GatePhase::Rejected), 1);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(GatePhase::Idle, GatePhase::Submitting));

        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory<GatePhase> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.transitions().len(), 1);
        assert_eq!(back.transitions()[0].to, GatePhase::Submitting);
    }
}
