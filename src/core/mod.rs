//! Core state machine types.
//!
//! - Phases via the `State` trait
//! - Guard predicates for transition control
//! - Timestamped history of transitions
//!
//! Everything here is pure; timers and randomness live in `gate`.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
