//! The home screen: chart of the selected month above the month list.

use super::chart::{ChartConfig, ChartInput};
use super::record::MonthlyRecord;
use super::selection::Ledger;
use super::LedgerError;
use crate::navigation::{Navigator, Route};
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

/// One row of the month list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthListItem {
    /// Stable list key, `"{label}-{index}"`.
    pub key: String,
    pub label: String,
    pub credited_text: String,
    pub debited_text: String,
}

impl MonthListItem {
    fn new(index: usize, record: &MonthlyRecord, currency: &str) -> Self {
        Self {
            key: format!("{}-{}", record.label, index),
            label: record.label.clone(),
            credited_text: format!("Credited: {}{}", currency, record.credited),
            debited_text: format!("Debited: {}{}", currency, record.debited),
        }
    }
}

pub struct HomeScreen<N: Navigator> {
    ledger: Ledger,
    chart: ChartConfig,
    navigator: N,
}

impl<N: Navigator> HomeScreen<N> {
    /// Mount with today's local date and an entropy-seeded generator.
    pub fn mount(chart: ChartConfig, navigator: N) -> Result<Self, LedgerError> {
        let today = Local::now().date_naive();
        Self::mount_with(today, &mut StdRng::from_entropy(), chart, navigator)
    }

    pub fn mount_with<R: Rng + ?Sized>(
        now: NaiveDate,
        rng: &mut R,
        chart: ChartConfig,
        navigator: N,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            ledger: Ledger::synthesize(now, rng)?,
            chart,
            navigator,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn month_items(&self) -> Vec<MonthListItem> {
        self.ledger
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| MonthListItem::new(i, r, &self.chart.y_axis_label))
            .collect()
    }

    /// List tap handler.
    pub fn select_month(&mut self, index: usize) -> Result<ChartInput, LedgerError> {
        self.ledger.select_month(index)?;
        Ok(self.chart())
    }

    pub fn chart(&self) -> ChartInput {
        self.ledger.chart(&self.chart)
    }

    /// Replace this screen with the entry gate.
    pub fn logout(self) {
        info!(route = Route::Entry.path(), "Logging out");
        self.navigator.navigate_replacing(Route::Entry);
    }
}
