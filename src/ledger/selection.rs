//! The synthesized history and the month selected for the chart.

use super::chart::{chart_data, ChartConfig, ChartInput};
use super::record::{synthesize_history, MonthlyRecord};
use super::LedgerError;
use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

/// Immutable monthly history plus a selection pointer into it.
#[derive(Clone, Debug)]
pub struct Ledger {
    records: Vec<MonthlyRecord>,
    selected: usize,
}

impl Ledger {
    /// Synthesize a history ending at `now`, selecting the newest month.
    pub fn synthesize<R: Rng + ?Sized>(now: NaiveDate, rng: &mut R) -> Result<Self, LedgerError> {
        let ledger = Self::from_records(synthesize_history(now, rng)?)?;
        debug!(months = ledger.records.len(), "Ledger history synthesized");
        Ok(ledger)
    }

    pub fn from_records(records: Vec<MonthlyRecord>) -> Result<Self, LedgerError> {
        if records.is_empty() {
            return Err(LedgerError::EmptyHistory);
        }
        Ok(Self {
            records,
            selected: 0,
        })
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn selected(&self) -> &MonthlyRecord {
        &self.records[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_month(&mut self, index: usize) -> Result<&MonthlyRecord, LedgerError> {
        if index >= self.records.len() {
            return Err(LedgerError::UnknownMonth(format!("index {index}")));
        }
        self.selected = index;
        debug!(label = %self.records[index].label, "Month selected");
        Ok(&self.records[index])
    }

    /// Select the history entry equal to `record`, e.g. one handed out by
    /// a list tap. Records that are not part of the history are refused.
    pub fn select_record(&mut self, record: &MonthlyRecord) -> Result<&MonthlyRecord, LedgerError> {
        let index = self
            .records
            .iter()
            .position(|r| r == record)
            .ok_or_else(|| LedgerError::UnknownMonth(record.label.clone()))?;
        self.select_month(index)
    }

    pub fn chart(&self, config: &ChartConfig) -> ChartInput {
        chart_data(self.selected(), config)
    }
}
