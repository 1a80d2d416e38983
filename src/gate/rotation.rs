//! Periodic replacement of the challenge code behind a fade.
//!
//! Each rotation walks `Idle -> FadingOut -> Swapping -> FadingIn -> Idle`.
//! The timer is only awaited again once a rotation is back in `Idle`, so two
//! rotations never interleave; the `Idle` guard on [`RotationCycle::begin`]
//! refuses to start one while another is in flight.

use super::code::{generate_code, ChallengeCode};
use crate::config::{ConfigError, GateConfig};
use crate::core::{Guard, State, StateHistory, StateTransition};
use crate::state_enum;
use chrono::Utc;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

state_enum! {
    /// Where the code display is within a rotation.
    pub enum RotationPhase {
        Idle,
        FadingOut,
        Swapping,
        FadingIn,
    }
}

/// Phase tracker for rotations, keeping the history of the latest one.
pub struct RotationCycle {
    phase: RotationPhase,
    can_begin: Guard<RotationPhase>,
    history: StateHistory<RotationPhase>,
    rotations: usize,
}

impl Default for RotationCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationCycle {
    pub fn new() -> Self {
        Self {
            phase: RotationPhase::Idle,
            can_begin: Guard::new(|p: &RotationPhase| matches!(p, RotationPhase::Idle)),
            history: StateHistory::new(),
            rotations: 0,
        }
    }

    pub fn phase(&self) -> &RotationPhase {
        &self.phase
    }

    /// Completed or in-flight rotations so far.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    pub fn history(&self) -> &StateHistory<RotationPhase> {
        &self.history
    }

    /// Start fading out. Returns `false` if a rotation is already running.
    pub fn begin(&mut self) -> bool {
        if !self.can_begin.check(&self.phase) {
            return false;
        }
        self.rotations += 1;
        self.history = StateHistory::new();
        self.enter(RotationPhase::FadingOut);
        true
    }

    /// Move to the next phase. `Idle` stays put.
    pub fn advance(&mut self) -> &RotationPhase {
        let next = match self.phase {
            RotationPhase::Idle => return &self.phase,
            RotationPhase::FadingOut => RotationPhase::Swapping,
            RotationPhase::Swapping => RotationPhase::FadingIn,
            RotationPhase::FadingIn => RotationPhase::Idle,
        };
        self.enter(next);
        &self.phase
    }

    fn enter(&mut self, next: RotationPhase) {
        self.history = self.history.record(StateTransition {
            from: self.phase.clone(),
            to: next.clone(),
            timestamp: Utc::now(),
            attempt: self.rotations,
        });
        self.phase = next;
    }
}

/// Animation collaborator driving the code's opacity.
pub trait Animator: Send + Sync + 'static {
    /// Resolve once the display has reached `opacity`.
    fn fade_to(&self, opacity: f32, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Default animator: waits out the fade and publishes the final opacity.
pub struct OpacityFade {
    opacity: watch::Sender<f32>,
}

impl OpacityFade {
    pub fn new() -> (Self, watch::Receiver<f32>) {
        let (opacity, rx) = watch::channel(1.0);
        (Self { opacity }, rx)
    }
}

impl Animator for OpacityFade {
    fn fade_to(&self, opacity: f32, duration: Duration) -> impl Future<Output = ()> + Send {
        async move {
            time::sleep(duration).await;
            self.opacity.send_replace(opacity);
        }
    }
}

/// Owner of a running rotation timer. Dropping it stops the timer.
#[derive(Debug)]
pub struct RotationHandle {
    task: JoinHandle<()>,
}

impl RotationHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RotationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start rotating codes every `config.rotation_interval()`.
///
/// `on_rotate` receives each new code between the fade-out and the fade-in.
/// The next tick is awaited only once a rotation is back in `Idle`, so the
/// guard in [`RotationCycle::begin`] never refuses a tick from this loop.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `config` fails
/// [`GateConfig::validate`]; no task is spawned in that case.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn start_rotation<R, A, F>(
    config: &GateConfig,
    mut rng: R,
    animator: A,
    mut on_rotate: F,
) -> Result<RotationHandle, ConfigError>
where
    R: Rng + Send + 'static,
    A: Animator,
    F: FnMut(ChallengeCode) + Send + 'static,
{
    config.validate()?;
    let period = config.rotation_interval();
    let fade = config.fade();

    let task = tokio::spawn(async move {
        let mut ticks = time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycle = RotationCycle::new();

        loop {
            ticks.tick().await;
            if !cycle.begin() {
                warn!(phase = cycle.phase().name(), "Rotation still in flight, skipping tick");
                continue;
            }

            animator.fade_to(0.0, fade).await;
            cycle.advance();
            on_rotate(generate_code(&mut rng));
            debug!(rotation = cycle.rotations(), "Challenge code rotated");
            cycle.advance();
            animator.fade_to(1.0, fade).await;
            cycle.advance();
        }
    });

    Ok(RotationHandle { task })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    #[test]
    fn cycle_walks_all_phases_in_order() {
        let mut cycle = RotationCycle::new();

        assert!(cycle.begin());
        assert_eq!(cycle.advance(), &RotationPhase::Swapping);
        assert_eq!(cycle.advance(), &RotationPhase::FadingIn);
        assert_eq!(cycle.advance(), &RotationPhase::Idle);

        assert_eq!(
            cycle.history().get_path(),
            vec![
                &RotationPhase::Idle,
                &RotationPhase::FadingOut,
                &RotationPhase::Swapping,
                &RotationPhase::FadingIn,
                &RotationPhase::Idle,
            ]
        );
    }

    #[test]
    fn begin_is_refused_mid_rotation() {
        let mut cycle = RotationCycle::new();
        assert!(cycle.begin());
        assert!(!cycle.begin());
        cycle.advance();
        assert!(!cycle.begin());
        cycle.advance();
        cycle.advance();
        assert!(cycle.begin());
        assert_eq!(cycle.rotations(), 2);
    }

    #[test]
    fn history_only_keeps_latest_rotation() {
        let mut cycle = RotationCycle::new();
        for _ in 0..3 {
            cycle.begin();
            while cycle.advance() != &RotationPhase::Idle {}
        }
        assert_eq!(cycle.history().transitions().len(), 4);
        assert!(cycle.history().transitions().iter().all(|t| t.attempt == 3));
    }

    #[test]
    fn idle_does_not_advance() {
        let mut cycle = RotationCycle::new();
        assert_eq!(cycle.advance(), &RotationPhase::Idle);
        assert!(cycle.history().transitions().is_empty());
        assert!(!cycle.phase().is_final());
    }

    #[tokio::test(start_paused = true)]
    async fn fade_out_completes_before_the_code_changes() {
        let (animator, opacity) = OpacityFade::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = start_rotation(
            &GateConfig::default(),
            StdRng::seed_from_u64(1),
            animator,
            move |code| {
                let _ = tx.send(code);
            },
        )
        .unwrap();

        time::sleep(Duration::from_millis(10_250)).await;
        assert_eq!(*opacity.borrow(), 1.0);
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(350)).await;
        assert_eq!(*opacity.borrow(), 0.0);
        let rotated = rx.try_recv().unwrap();
        let expected = generate_code(&mut StdRng::seed_from_u64(1));
        assert_eq!(rotated.value(), expected.value());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*opacity.borrow(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn rotates_once_per_interval() {
        let (animator, _opacity) = OpacityFade::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = start_rotation(
            &GateConfig::default(),
            StdRng::seed_from_u64(2),
            animator,
            move |code| {
                let _ = tx.send(code);
            },
        )
        .unwrap();

        time::sleep(Duration::from_millis(31_000)).await;

        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_rotation_never_fires() {
        let (animator, _opacity) = OpacityFade::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = start_rotation(
            &GateConfig::default(),
            StdRng::seed_from_u64(3),
            animator,
            move |code| {
                let _ = tx.send(code);
            },
        )
        .unwrap();

        handle.cancel();
        time::sleep(Duration::from_secs(25)).await;

        assert!(rx.try_recv().is_err());
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_rotation() {
        let (animator, _opacity) = OpacityFade::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = start_rotation(
            &GateConfig::default(),
            StdRng::seed_from_u64(4),
            animator,
            move |code| {
                let _ = tx.send(code);
            },
        )
        .unwrap();

        drop(handle);
        time::sleep(Duration::from_secs(25)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_refused_up_front() {
        let (animator, _opacity) = OpacityFade::new();
        let config = GateConfig {
            rotation_interval_ms: 0,
            ..GateConfig::default()
        };

        let result = start_rotation(&config, StdRng::seed_from_u64(4), animator, |_| {});

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
