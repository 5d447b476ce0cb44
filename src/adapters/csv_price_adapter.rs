//! CSV price source adapter.
//!
//! Reads a wide daily price table: a `Date` column plus one numeric column
//! per stock. The stock universe is whatever columns the header carries, so
//! no fixed column count is assumed.

use crate::domain::error::IndexError;
use crate::domain::price_table::{PriceRow, PriceTable};
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Accepted date formats, tried in order against the first data row; the
/// first one that parses is locked for the whole file and reused when
/// formatting output dates.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Header names that are never stock columns. `Date` is the row key; the
/// others are derived columns some exports carry alongside the prices.
const RESERVED_COLUMNS: &[&str] = &["date", "year", "month", "month_year"];

pub struct CsvPriceAdapter {
    path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse_str(content: &str) -> Result<PriceTable, IndexError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| IndexError::MalformedRow {
                line: 1,
                reason: format!("unreadable header: {}", e),
            })?
            .clone();

        let date_col = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("date"))
            .ok_or_else(|| IndexError::MalformedRow {
                line: 1,
                reason: "missing Date column".into(),
            })?;

        let mut stocks = Vec::new();
        let mut stock_cols = Vec::new();
        for (col, header) in headers.iter().enumerate() {
            let name = header.trim();
            if RESERVED_COLUMNS.contains(&name.to_ascii_lowercase().as_str()) {
                continue;
            }
            stocks.push(name.to_string());
            stock_cols.push(col);
        }

        let mut rows = Vec::new();
        let mut seen_dates = HashSet::new();
        let mut date_format: Option<&'static str> = None;

        for (i, result) in rdr.records().enumerate() {
            let line = i + 2;
            let record = result.map_err(|e| IndexError::MalformedRow {
                line,
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record
                .get(date_col)
                .map(str::trim)
                .unwrap_or_default();
            let date = parse_date(date_str, &mut date_format).ok_or_else(|| {
                IndexError::MalformedRow {
                    line,
                    reason: format!("unparsable date '{}'", date_str),
                }
            })?;

            if !seen_dates.insert(date) {
                return Err(IndexError::MalformedRow {
                    line,
                    reason: format!("duplicate date {}", date_str),
                });
            }

            let prices: Vec<Option<f64>> = stock_cols
                .iter()
                .map(|&col| {
                    record
                        .get(col)
                        .map(str::trim)
                        .filter(|cell| !cell.is_empty())
                        .and_then(|cell| cell.parse::<f64>().ok())
                        .filter(|v| v.is_finite())
                })
                .collect();

            if !prices.is_empty() && prices.iter().all(Option::is_none) {
                return Err(IndexError::MalformedRow {
                    line,
                    reason: "no numeric stock values".into(),
                });
            }

            rows.push(PriceRow { date, prices });
        }

        let format = date_format.unwrap_or(DATE_FORMATS[0]);
        Ok(PriceTable::new(stocks, rows).with_date_format(format))
    }
}

/// Parses with the locked format, or locks onto the first candidate that
/// parses when no format has been chosen yet.
fn parse_date(value: &str, locked: &mut Option<&'static str>) -> Option<NaiveDate> {
    if let Some(format) = *locked {
        return NaiveDate::parse_from_str(value, format).ok();
    }
    for &format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            *locked = Some(format);
            return Some(date);
        }
    }
    None
}

impl PricePort for CsvPriceAdapter {
    fn fetch_prices(&self) -> Result<PriceTable, IndexError> {
        let content = fs::read_to_string(&self.path)?;
        Self::parse_str(&content)
    }
}
