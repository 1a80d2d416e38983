//! Synthetic monthly records.

use super::LedgerError;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Months synthesized per history, newest first.
pub const HISTORY_MONTHS: usize = 6;

pub const CREDITED_RANGE: RangeInclusive<u32> = 1000..=5999;
pub const DEBITED_RANGE: RangeInclusive<u32> = 500..=3499;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: u32,
}

/// One month of made-up totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyRecord {
    /// `"MMM YYYY"`, e.g. `"Dec 2023"`.
    pub label: String,
    pub credited: u32,
    pub debited: u32,
    /// Shared by every record of a history.
    pub categories: Arc<[CategoryAmount]>,
}

/// The fixed breakdown every month reports.
pub fn sample_categories() -> Arc<[CategoryAmount]> {
    [
        ("Food", 1500),
        ("Transport", 800),
        ("Shopping", 2000),
        ("Bills", 1500),
    ]
    .into_iter()
    .map(|(category, amount)| CategoryAmount {
        category: category.to_string(),
        amount,
    })
    .collect()
}

/// Resolve the month `offset` months before `now` to `(year, month0)`.
///
/// Uses floored division so offsets crossing January land in December of
/// the previous year.
pub fn month_back(now: NaiveDate, offset: u32) -> (i32, u32) {
    let month_index = now.month0() as i32 - offset as i32;
    let year = now.year() + month_index.div_euclid(12);
    let month0 = month_index.rem_euclid(12) as u32;
    (year, month0)
}

fn month_label(year: i32, month0: u32) -> Result<String, LedgerError> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .ok_or(LedgerError::MonthOutOfRange { year, month: month0 + 1 })?;
    Ok(first.format("%b %Y").to_string())
}

/// Build [`HISTORY_MONTHS`] records from the month of `now` backwards.
///
/// Fails with [`LedgerError::MonthOutOfRange`] only when one of the six
/// months falls before the earliest date chrono can represent.
pub fn synthesize_history<R: Rng + ?Sized>(
    now: NaiveDate,
    rng: &mut R,
) -> Result<Vec<MonthlyRecord>, LedgerError> {
    let categories = sample_categories();

    (0..HISTORY_MONTHS as u32)
        .map(|offset| {
            let (year, month0) = month_back(now, offset);
            Ok(MonthlyRecord {
                label: month_label(year, month0)?,
                credited: rng.gen_range(CREDITED_RANGE),
                debited: rng.gen_range(DEBITED_RANGE),
                categories: Arc::clone(&categories),
            })
        })
        .collect()
}
