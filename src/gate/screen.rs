//! The entry screen: owns the code, the typed fields and the timers.

use super::attempt::{verify, Field, LoginAttempt, Verdict, MISMATCH_MESSAGE};
use super::code::{generate_code, ChallengeCode};
use super::rotation::{start_rotation, OpacityFade, RotationHandle};
use super::{GateError, GatePhase};
use crate::config::GateConfig;
use crate::core::{State, StateHistory};
use crate::effects::{StateMachine, StepResult, Transition, TransitionError, TransitionResult};
use crate::error::Error;
use crate::navigation::{Navigator, Route};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use stillwater::prelude::*;
use stillwater::validation::Validation;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const CANCELLED_REASON: &str = "submission cancelled";

/// Environment a submission runs against: the guess as typed and the code
/// that was current when the user pressed submit.
#[derive(Clone, Debug)]
pub struct Submission {
    pub guess: String,
    pub code: ChallengeCode,
}

/// `Idle -> Submitting -> {Accepted | Rejected -> Idle}`.
pub fn submission_machine() -> StateMachine<GatePhase, Submission> {
    StateMachine::new(GatePhase::Idle)
        .with_transition(Transition {
            from: GatePhase::Idle,
            to: GatePhase::Submitting,
            guard: None,
            action: Arc::new(|| pure(TransitionResult::Success(GatePhase::Submitting)).boxed()),
        })
        .with_transition(Transition {
            from: GatePhase::Submitting,
            to: GatePhase::Accepted,
            guard: None,
            action: Arc::new(|| {
                from_fn(|env: &Submission| match verify(&env.guess, &env.code) {
                    Verdict::Accepted => Ok(TransitionResult::Success(GatePhase::Accepted)),
                    Verdict::Rejected { message } => Ok(TransitionResult::Abort {
                        reason: message,
                        error_state: GatePhase::Rejected,
                    }),
                })
                .boxed()
            }),
        })
        .with_transition(Transition {
            from: GatePhase::Rejected,
            to: GatePhase::Idle,
            guard: None,
            action: Arc::new(|| pure(TransitionResult::Success(GatePhase::Idle)).boxed()),
        })
}

/// State of the entry screen between mount and unmount.
///
/// Mounting starts the rotation timer; dropping or unmounting the screen
/// cancels it.
pub struct EntryScreen<N: Navigator> {
    config: GateConfig,
    attempt: LoginAttempt,
    code: Arc<watch::Sender<ChallengeCode>>,
    opacity: watch::Receiver<f32>,
    busy: watch::Sender<bool>,
    machine: StateMachine<GatePhase, Submission>,
    rng: StdRng,
    rotation: RotationHandle,
    navigator: N,
}

impl<N: Navigator> EntryScreen<N> {
    /// Mount the screen with an entropy-seeded generator.
    ///
    /// # Errors
    ///
    /// Fails when `config` does not pass [`GateConfig::validate`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn mount(config: GateConfig, navigator: N) -> Result<Self, Error> {
        Self::mount_with_rng(config, navigator, StdRng::from_entropy())
    }

    pub fn mount_with_rng(config: GateConfig, navigator: N, mut rng: StdRng) -> Result<Self, Error> {
        let (code_tx, _) = watch::channel(generate_code(&mut rng));
        let code = Arc::new(code_tx);
        let (animator, opacity) = OpacityFade::new();

        let sink = Arc::clone(&code);
        let rotation = start_rotation(
            &config,
            StdRng::seed_from_u64(rng.gen()),
            animator,
            move |next| {
                sink.send_replace(next);
            },
        )?;
        let (busy, _) = watch::channel(false);
        debug!("Entry screen mounted");

        Ok(Self {
            config,
            attempt: LoginAttempt::new(),
            code,
            opacity,
            busy,
            machine: submission_machine(),
            rng,
            rotation,
            navigator,
        })
    }

    /// Focus hook: forget what was typed and draw a fresh code.
    pub fn on_focus(&mut self) -> ChallengeCode {
        self.attempt.clear();
        self.machine = submission_machine();
        self.busy.send_replace(false);
        let fresh = generate_code(&mut self.rng);
        self.code.send_replace(fresh.clone());
        debug!("Entry screen focused, code reset");
        fresh
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.attempt.set_name(name);
    }

    /// Numeric field input; anything past four characters is dropped.
    pub fn set_guess(&mut self, input: &str) {
        self.attempt.set_guess(input);
    }

    pub fn name(&self) -> &str {
        self.attempt.name()
    }

    pub fn guess(&self) -> &str {
        self.attempt.guess()
    }

    pub fn current_code(&self) -> ChallengeCode {
        self.code.borrow().clone()
    }

    pub fn subscribe_code(&self) -> watch::Receiver<ChallengeCode> {
        self.code.subscribe()
    }

    /// Current opacity of the code text, `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        *self.opacity.borrow()
    }

    pub fn subscribe_opacity(&self) -> watch::Receiver<f32> {
        self.opacity.clone()
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub fn phase(&self) -> &GatePhase {
        self.machine.current_state()
    }

    pub fn history(&self) -> &StateHistory<GatePhase> {
        self.machine.history()
    }

    /// Whether the login button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.machine.is_final() && self.attempt.validate().is_success()
    }

    /// Check the typed guess against the code current right now.
    ///
    /// An accepted login keeps `busy` raised for the configured delay, then
    /// replaces the screen with [`Route::Home`]. A rejection clears `busy`
    /// straight away and returns the gate to idle.
    ///
    /// The gate only commits to `Accepted` once the delay has elapsed.
    /// Dropping the future earlier clears `busy` and returns the gate to
    /// `Idle` without navigating, so the user can submit again.
    pub async fn submit(&mut self) -> Result<Verdict, GateError> {
        if self.machine.is_final() {
            return Err(GateError::AlreadyAccepted);
        }
        if self.is_busy() {
            return Err(GateError::Busy);
        }
        if let Validation::Failure(missing) = self.attempt.validate() {
            return Err(GateError::ValidationBlocked {
                missing: missing.iter().copied().collect::<Vec<Field>>(),
            });
        }

        let submission = Submission {
            guess: self.attempt.guess().to_string(),
            code: self.current_code(),
        };
        let mut flight = InFlight::start(&mut self.machine, &self.busy);
        let verdict = flight.run(&submission, self.config.verify_delay()).await?;
        drop(flight);

        match &verdict {
            Verdict::Accepted => {
                info!(
                    name = self.attempt.name().trim(),
                    submission = self.machine.rounds(),
                    "Security code accepted"
                );
                info!(route = Route::Home.path(), "Navigating");
                self.navigator.navigate_replacing(Route::Home);
            }
            Verdict::Rejected { .. } => {
                warn!(submission = self.machine.rounds(), "Security code rejected");
            }
        }

        Ok(verdict)
    }

    /// Tear the screen down, stopping the rotation timer.
    pub fn unmount(self) {
        self.rotation.cancel();
        debug!("Entry screen unmounted");
    }
}

/// A submission between raising `busy` and its verdict.
///
/// Dropping it clears `busy`. If the gate is still `Submitting` at that
/// point, the submission was abandoned and the gate is put back in `Idle`.
struct InFlight<'a> {
    machine: &'a mut StateMachine<GatePhase, Submission>,
    busy: &'a watch::Sender<bool>,
}

impl<'a> InFlight<'a> {
    fn start(
        machine: &'a mut StateMachine<GatePhase, Submission>,
        busy: &'a watch::Sender<bool>,
    ) -> Self {
        busy.send_replace(true);
        Self { machine, busy }
    }

    async fn run(
        &mut self,
        submission: &Submission,
        delay: Duration,
    ) -> Result<Verdict, GateError> {
        self.step(submission).await?;

        let (from, result) = self.machine.step().run(submission).await?;
        match result.target() {
            GatePhase::Accepted => {
                tokio::time::sleep(delay).await;
                self.machine.apply_result(from, result);
                Ok(Verdict::Accepted)
            }
            GatePhase::Rejected => {
                self.machine.apply_result(from, result);
                self.step(submission).await?;
                Ok(Verdict::Rejected {
                    message: MISMATCH_MESSAGE.to_string(),
                })
            }
            other => Err(TransitionError::ActionFailed(format!(
                "submission stopped in '{}'",
                other.name()
            ))
            .into()),
        }
    }

    async fn step(&mut self, submission: &Submission) -> Result<(), GateError> {
        let (from, result) = self.machine.step().run(submission).await?;
        self.machine.apply_result(from, result);
        Ok(())
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.machine.current_state() == &GatePhase::Submitting {
            warn!("Submission abandoned before a verdict");
            self.machine.apply_result(
                GatePhase::Submitting,
                StepResult::Aborted {
                    reason: CANCELLED_REASON.to_string(),
                    error_state: GatePhase::Idle,
                },
            );
        }
        self.busy.send_replace(false);
    }
}
