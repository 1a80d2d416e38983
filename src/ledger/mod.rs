//! Synthetic six-month ledger shown after the gate.
//!
//! The history is generated once when the home screen mounts and is never
//! refreshed. Selecting a month only moves a pointer into it.

mod chart;
mod record;
mod screen;
mod selection;

use thiserror::Error;

pub use chart::{chart_data, ChartConfig, ChartInput, Dataset, Rgb, CHART_LABELS};
pub use record::{
    month_back, sample_categories, synthesize_history, CategoryAmount, MonthlyRecord,
    CREDITED_RANGE, DEBITED_RANGE, HISTORY_MONTHS,
};
pub use screen::{HomeScreen, MonthListItem};
pub use selection::Ledger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Month {0} is not part of the synthesized history")]
    UnknownMonth(String),

    #[error("Month {year}-{month:02} cannot be represented")]
    MonthOutOfRange { year: i32, month: u32 },

    #[error("Ledger history is empty")]
    EmptyHistory,

    #[error("Failed to serialize chart input: {0}")]
    Serialize(#[from] serde_json::Error),
}
