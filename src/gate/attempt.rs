//! Login attempt fields, their validation, and guess verification.

use super::code::ChallengeCode;
use super::GateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Longest guess the code field accepts.
pub const MAX_GUESS_LEN: usize = 4;

pub const MISMATCH_MESSAGE: &str = "The random number is incorrect. Please try again.";

/// Input fields of the entry screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Name,
    Guess,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Guess => f.write_str("security code"),
        }
    }
}

/// Outcome of comparing a guess with the current code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected { message: String },
}

impl Verdict {
    pub fn rejected() -> Self {
        Verdict::Rejected {
            message: MISMATCH_MESSAGE.to_string(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Turn a rejection into [`GateError::CodeMismatch`].
    pub fn into_result(self) -> Result<(), GateError> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected { .. } => Err(GateError::CodeMismatch),
        }
    }
}

/// Compare a guess against the code current at submission.
///
/// Exact string comparison after trimming the guess; no numeric coercion.
pub fn verify(guess: &str, current: &ChallengeCode) -> Verdict {
    if guess.trim() == current.value() {
        Verdict::Accepted
    } else {
        Verdict::rejected()
    }
}

/// What the user has typed so far. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginAttempt {
    name: String,
    guess: String,
}

impl LoginAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Store the code field's text, cut to [`MAX_GUESS_LEN`] characters.
    pub fn set_guess(&mut self, input: &str) {
        self.guess = input.chars().take(MAX_GUESS_LEN).collect();
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.guess.clear();
    }

    /// Check both fields, reporting every empty one at once.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<Field>> {
        let checks: Vec<Validation<(), NonEmptyVec<Field>>> = [
            (Field::Name, self.name.as_str()),
            (Field::Guess, self.guess.as_str()),
        ]
        .into_iter()
        .map(|(field, value)| {
            if value.trim().is_empty() {
                Validation::fail(field)
            } else {
                Validation::success(())
            }
        })
        .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Any non-empty name is accepted; only the guess is compared.
    pub fn verify(&self, current: &ChallengeCode) -> Verdict {
        verify(&self.guess, current)
    }
}
