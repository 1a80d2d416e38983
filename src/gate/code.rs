//! Challenge codes.

use super::GateError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;

pub const CODE_MIN: u16 = 1000;
pub const CODE_MAX: u16 = 9999;

/// The 4-digit value the user has to re-type.
///
/// Codes are replaced wholesale on every rotation and focus, never edited.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChallengeCode {
    value: String,
    issued_at: DateTime<Utc>,
}

impl ChallengeCode {
    /// Build a code from a number in `1000..=9999`.
    pub fn new(value: u16) -> Result<Self, GateError> {
        if !(CODE_MIN..=CODE_MAX).contains(&value) {
            return Err(GateError::CodeOutOfRange(value));
        }
        Ok(Self {
            value: value.to_string(),
            issued_at: Utc::now(),
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Text shown above the input fields.
    pub fn display_text(&self) -> String {
        format!("Security Code: {}", self.value)
    }
}

impl fmt::Display for ChallengeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Draw a fresh code uniformly from `1000..=9999`.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> ChallengeCode {
    let value = rng.gen_range(CODE_MIN..=CODE_MAX);
    ChallengeCode {
        value: value.to_string(),
        issued_at: Utc::now(),
    }
}
