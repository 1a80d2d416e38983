//! Effectful state machine operations using Stillwater 0.11.0.
//!
//! The gate drives its submission flow through these types: each
//! transition carries an action factory producing a fresh effect, and the
//! environment the effect runs against carries the guess and the code that
//! was current when the user pressed submit.
//!
//! Following Stillwater 0.11.0 conventions:
//! - Functions return `impl Effect` for zero-cost composition
//! - Collections store `BoxedEffect` (one allocation per transition)
//! - Use free-standing constructors: `pure()`, `fail()`, `from_fn()`

mod machine;
mod transition;

pub use machine::{StateMachine, StepResult};
pub use transition::{Transition, TransitionAction, TransitionError, TransitionResult};
