//! State machine that executes effectful transitions.

use crate::core::{State, StateHistory, StateTransition};
use crate::effects::transition::{Transition, TransitionError, TransitionResult};
use chrono::Utc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// Result of executing a single step
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<S: State> {
    /// Successfully transitioned to new state
    Transitioned(S),

    /// Transition aborted into an error phase
    Aborted { reason: String, error_state: S },
}

impl<S: State> StepResult<S> {
    /// The phase the machine lands in once this result is applied.
    pub fn target(&self) -> &S {
        match self {
            StepResult::Transitioned(next) => next,
            StepResult::Aborted { error_state, .. } => error_state,
        }
    }
}

/// State machine that executes effectful transitions.
///
/// Every departure from the initial phase starts a new round; recorded
/// transitions carry the round they belong to.
pub struct StateMachine<S: State + 'static, Env: Clone + Send + Sync + 'static> {
    initial: S,
    current: S,
    transitions: Vec<Transition<S, Env>>,
    history: StateHistory<S>,
    round: usize,
}

impl<S: State + 'static, Env: Clone + Send + Sync + 'static> StateMachine<S, Env> {
    /// Create a new state machine in the initial state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial.clone(),
            initial,
            transitions: Vec::new(),
            history: StateHistory::new(),
            round: 0,
        }
    }

    pub fn with_transition(mut self, transition: Transition<S, Env>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Rounds started so far.
    pub fn rounds(&self) -> usize {
        self.round
    }

    /// Execute one step of the state machine.
    ///
    /// Run the returned effect against an environment, then pass its
    /// output to [`apply_result`](Self::apply_result).
    pub fn step(
        &self,
    ) -> impl Effect<Output = (S, StepResult<S>), Error = TransitionError, Env = Env> + '_ {
        let Some(transition) = self
            .transitions
            .iter()
            .find(|t| t.can_execute(&self.current))
        else {
            return fail(TransitionError::NoTransition {
                from: self.current.name().to_string(),
            })
            .boxed();
        };

        let from_state = self.current.clone();
        let action = (transition.action)();

        action
            .map(move |result| {
                let step_result = match result {
                    TransitionResult::Success(new_state) => StepResult::Transitioned(new_state),
                    TransitionResult::Abort {
                        reason,
                        error_state,
                    } => StepResult::Aborted {
                        reason,
                        error_state,
                    },
                };
                (from_state.clone(), step_result)
            })
            .boxed()
    }

    /// Apply the output of [`step`](Self::step).
    ///
    /// Both successful and aborted steps are recorded in the history.
    pub fn apply_result(&mut self, from_state: S, result: StepResult<S>) {
        let next = match result {
            StepResult::Transitioned(next) => next,
            StepResult::Aborted { error_state, .. } => error_state,
        };
        if from_state == self.initial {
            self.round += 1;
        }
        self.history = self.history.record(StateTransition {
            from: from_state,
            to: next.clone(),
            timestamp: Utc::now(),
            attempt: self.round,
        });
        self.current = next;
    }
}
