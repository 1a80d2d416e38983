//! The code gate in front of the ledger.
//!
//! A 4-digit challenge code is drawn when the entry screen mounts, swapped
//! behind a fade every ten seconds, and redrawn whenever the screen regains
//! focus. The user types their name and the code; a submission is compared
//! against whatever code is current at that instant. Any non-empty name is
//! accepted.

mod attempt;
mod code;
mod rotation;
mod screen;

use crate::effects::TransitionError;
use crate::state_enum;
use thiserror::Error;

pub use attempt::{verify, Field, LoginAttempt, Verdict, MAX_GUESS_LEN, MISMATCH_MESSAGE};
pub use code::{generate_code, ChallengeCode, CODE_MAX, CODE_MIN};
pub use rotation::{
    start_rotation, Animator, OpacityFade, RotationCycle, RotationHandle, RotationPhase,
};
pub use screen::{submission_machine, EntryScreen, Submission};

state_enum! {
    /// Submission flow of the entry screen.
    pub enum GatePhase {
        Idle,
        Submitting,
        Accepted,
        Rejected,
    }
    final: [Accepted]
    error: [Rejected]
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Cannot submit: {} required", join_fields(.missing))]
    ValidationBlocked { missing: Vec<Field> },

    #[error("The random number is incorrect. Please try again.")]
    CodeMismatch,

    #[error("A submission is already in progress")]
    Busy,

    #[error("Login already accepted")]
    AlreadyAccepted,

    #[error("Challenge code {0} is outside {min}..={max}", min = CODE_MIN, max = CODE_MAX)]
    CodeOutOfRange(u16),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}
