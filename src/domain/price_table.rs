//! Wide daily price table: one row per date, one column per stock.

use crate::domain::calendar::{is_business_day, MonthBucket};
use chrono::NaiveDate;
use std::collections::HashSet;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of prices. `prices` is parallel to [`PriceTable::stocks`];
/// `None` marks a gap (no price published for that stock on that day).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub prices: Vec<Option<f64>>,
}

/// Immutable daily price table, sorted by date ascending.
///
/// Dates must be unique; the source adapter enforces this before
/// construction. Row order on input is irrelevant: construction sorts,
/// so ingestion is deterministic under reordering.
#[derive(Debug, Clone)]
pub struct PriceTable {
    stocks: Vec<String>,
    rows: Vec<PriceRow>,
    date_format: String,
}

impl PriceTable {
    pub fn new(stocks: Vec<String>, mut rows: Vec<PriceRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self {
            stocks,
            rows,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Records the date format detected in the source so the sink can
    /// format output dates consistently with the input.
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn stocks(&self) -> &[String] {
        &self.stocks
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows falling on business days (Monday-Friday), in date order.
    pub fn business_rows(&self) -> Vec<&PriceRow> {
        self.rows
            .iter()
            .filter(|r| is_business_day(r.date))
            .collect()
    }

    /// Number of distinct calendar months containing at least one
    /// business-day row. The calculation needs at least two.
    pub fn business_month_count(&self) -> usize {
        let months: HashSet<MonthBucket> = self
            .business_rows()
            .iter()
            .map(|r| MonthBucket::of(r.date))
            .collect();
        months.len()
    }

    /// (first date, last date, row count) of the full table, or `None` when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate, usize)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, self.rows.len())),
            _ => None,
        }
    }
}
