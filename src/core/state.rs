//! Core State trait for the gate and rotation machines.
//!
//! Every phase enum in the crate implements this trait, which provides
//! pure methods for inspecting phase properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine phases.
///
/// All methods are pure. Phases are small immutable values that describe
/// where a screen currently is, e.g. whether a login is being submitted or
/// whether the challenge code is fading out.
///
/// # Example
///
/// ```rust
/// use ledgergate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum LoginPhase {
///     Idle,
///     Submitting,
///     Accepted,
/// }
///
/// impl State for LoginPhase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Submitting => "Submitting",
///             Self::Accepted => "Accepted",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Accepted)
///     }
/// }
///
/// assert!(LoginPhase::Accepted.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the phase for display and logging.
    fn name(&self) -> &str;

    /// Whether no further transitions are expected from this phase.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this phase represents a failed outcome.
    ///
    /// Error phases are not necessarily final: a rejected login returns
    /// to idle. Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Phase {
        Idle,
        Submitting,
        Accepted,
        Rejected,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Submitting => "Submitting",
                Self::Accepted => "Accepted",
                Self::Rejected => "Rejected",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Accepted)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Rejected)
        }
    }

    #[test]
    fn name_matches_variant() {
        assert_eq!(Phase::Idle.name(), "Idle");
        assert_eq!(Phase::Submitting.name(), "Submitting");
        assert_eq!(Phase::Accepted.name(), "Accepted");
        assert_eq!(Phase::Rejected.name(), "Rejected");
    }

    #[test]
    fn rejected_is_error_but_not_final() {
        assert!(Phase::Rejected.is_error());
        assert!(!Phase::Rejected.is_final());
        assert!(Phase::Accepted.is_final());
        assert!(!Phase::Accepted.is_error());
    }

    #[test]
    fn phase_serializes_by_name() {
        let json = serde_json::to_string(&Phase::Submitting).unwrap();
        assert_eq!(json, "\"Submitting\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::Submitting);
    }
}
