//! Index calculation pipeline.
//!
//! Stages: business-day filter, month bucketing, constituent selection,
//! lagged weight scheduling, return aggregation, compounding, windowing and
//! rebase. The core is the pure [`compute_index_series`]; [`IndexCalculator`]
//! wraps it with a cached price table so repeated calculations and the
//! export step share one parsed input.

use crate::domain::calendar::MonthBucket;
use crate::domain::error::IndexError;
use crate::domain::index_series::IndexSeries;
use crate::domain::price_table::{PriceRow, PriceTable};
use crate::domain::selection::select_top3;
use crate::domain::weights::{build_schedule, MonthClose, WeightVector};
use crate::ports::export_port::ExportPort;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Computes the daily index-level series for `[start, end]`.
///
/// The series is a pure function of its inputs: identical table and window
/// always produce identical rows.
pub fn compute_index_series(
    table: &PriceTable,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IndexSeries, IndexError> {
    if table.is_empty() {
        return Err(IndexError::EmptyInput);
    }
    if start > end {
        return Err(IndexError::InvalidDateRange {
            start,
            end,
            reason: "start_date is after end_date".into(),
        });
    }

    let rows = table.business_rows();
    let months = group_by_month(&rows);
    if months.len() < 2 {
        return Err(IndexError::InsufficientData {
            months: months.len(),
        });
    }

    let month_closes: Vec<MonthClose> = months
        .iter()
        .map(|(_, month_rows)| {
            // Selection ranks market caps on the month's last business day.
            let cutoff = month_rows[month_rows.len() - 1];
            MonthClose {
                dates: month_rows.iter().map(|r| r.date).collect(),
                selection: select_top3(table.stocks(), &cutoff.prices),
            }
        })
        .collect();

    let schedule = build_schedule(&month_closes);

    let row_index: HashMap<NaiveDate, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.date, i))
        .collect();

    let returns: Vec<(NaiveDate, f64)> = schedule
        .iter()
        .map(|(date, weights)| {
            let idx = row_index[date];
            let ret = if idx == 0 {
                0.0
            } else {
                weighted_return(table.stocks(), weights, rows[idx - 1], rows[idx])
            };
            (*date, ret)
        })
        .collect();

    IndexSeries::from_returns(&returns, start, end, table.date_format())
}

/// Weighted simple return from `prev` to `current`. A stock with a missing
/// price on either day, or a non-finite ratio, contributes zero.
fn weighted_return(
    stocks: &[String],
    weights: &WeightVector,
    prev: &PriceRow,
    current: &PriceRow,
) -> f64 {
    let mut total = 0.0;
    for (stock, weight) in weights.entries() {
        let Some(col) = stocks.iter().position(|s| s == stock) else {
            continue;
        };
        if let (Some(p_prev), Some(p_now)) = (prev.prices[col], current.prices[col]) {
            let ret = p_now / p_prev - 1.0;
            if ret.is_finite() {
                total += weight * ret;
            }
        }
    }
    total / 100.0
}

/// Groups sorted business-day rows into chronological calendar months.
fn group_by_month<'a>(rows: &[&'a PriceRow]) -> Vec<(MonthBucket, Vec<&'a PriceRow>)> {
    let mut months: Vec<(MonthBucket, Vec<&'a PriceRow>)> = Vec::new();
    for &row in rows {
        let bucket = MonthBucket::of(row.date);
        match months.last_mut() {
            Some((current, month_rows)) if *current == bucket => month_rows.push(row),
            _ => months.push((bucket, vec![row])),
        }
    }
    months
}

/// Holds a parsed price table and the most recent calculation result.
///
/// `calculate` stores its result so `export` can write it without
/// recomputing; exporting before a successful calculation fails with
/// [`IndexError::NotCalculated`]. The table itself is never mutated.
pub struct IndexCalculator {
    table: PriceTable,
    result: Option<IndexSeries>,
}

impl IndexCalculator {
    pub fn new(table: PriceTable) -> Self {
        Self {
            table,
            result: None,
        }
    }

    pub fn from_port(port: &dyn PricePort) -> Result<Self, IndexError> {
        Ok(Self::new(port.fetch_prices()?))
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn calculate(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<&IndexSeries, IndexError> {
        let series = compute_index_series(&self.table, start, end)?;
        Ok(self.result.insert(series))
    }

    pub fn result(&self) -> Option<&IndexSeries> {
        self.result.as_ref()
    }

    pub fn export(&self, port: &dyn ExportPort, output_path: &str) -> Result<(), IndexError> {
        let series = self.result.as_ref().ok_or(IndexError::NotCalculated)?;
        port.write(series, output_path)
    }
}
