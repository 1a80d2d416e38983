//! Ledgergate: the state behind a two-screen expense tracker.
//!
//! The entry screen asks the user to re-type a 4-digit security code that
//! rotates every ten seconds; a correct guess replaces it with the home
//! screen, which charts randomly generated credited/debited totals for the
//! last six months. Rendering is left to the host toolkit: this crate owns
//! the screen state, the timers and the data the widgets consume.
//!
//! # Core Concepts
//!
//! - **Phases**: `State` enums for the submission flow and the code rotation
//! - **Guards**: Pure predicates that control transitions
//! - **Effects**: Submission checks run as Stillwater effects against the
//!   code current at submit time
//! - **Ledger**: Six synthesized months and the one selected for the chart
//!
//! # Example
//!
//! ```rust
//! use ledgergate::gate::{verify, ChallengeCode, Verdict};
//! use ledgergate::ledger::{synthesize_history, chart_data, ChartConfig};
//! use chrono::NaiveDate;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let code = ChallengeCode::new(4821).unwrap();
//! assert_eq!(verify("4821", &code), Verdict::Accepted);
//!
//! let now = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let history = synthesize_history(now, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(history[1].label, "Dec 2023");
//!
//! let chart = chart_data(&history[1], &ChartConfig::default());
//! assert_eq!(chart.values(), &[history[1].credited, history[1].debited]);
//! ```

mod macros;

pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod navigation;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::{load_config, AppConfig, GateConfig};
pub use crate::core::{Guard, State, StateHistory, StateTransition};
pub use crate::error::{Error, Result};
pub use crate::gate::{ChallengeCode, EntryScreen, GateError, GatePhase, Verdict};
pub use crate::ledger::{HomeScreen, Ledger, LedgerError, MonthlyRecord};
pub use crate::navigation::{Navigator, Route};
