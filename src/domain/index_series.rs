//! Computed index output: daily return, cumulative value, normalized level.

use crate::domain::error::IndexError;
use chrono::NaiveDate;

/// One business day of the computed index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub date: NaiveDate,
    /// Weighted daily return (fraction, not percent).
    pub daily_return: f64,
    /// Cumulative value: `100 * exp(sum of returns)` since series start.
    pub cumulative_value: f64,
    /// Cumulative value rebased so the window's first row is 100.00,
    /// rounded to 2 decimals.
    pub index_level: f64,
}

/// The exported series: business days in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSeries {
    pub rows: Vec<IndexRow>,
    /// Date format carried over from the input source for the sink.
    pub date_format: String,
}

impl IndexSeries {
    /// Compounds `returns` (chronological), clips to `[start, end]` and
    /// rebases the first retained row to exactly 100.00.
    ///
    /// A non-finite return contributes zero to the cumulative sum; this
    /// preserves the level across data gaps rather than breaking the
    /// compounding.
    pub fn from_returns(
        returns: &[(NaiveDate, f64)],
        start: NaiveDate,
        end: NaiveDate,
        date_format: &str,
    ) -> Result<Self, IndexError> {
        let mut cumulative = 0.0;
        let mut rows = Vec::new();

        for &(date, daily_return) in returns {
            let contribution = if daily_return.is_finite() {
                daily_return
            } else {
                0.0
            };
            cumulative += contribution;

            if date < start || date > end {
                continue;
            }
            rows.push(IndexRow {
                date,
                daily_return: contribution,
                cumulative_value: 100.0 * cumulative.exp(),
                index_level: 0.0,
            });
        }

        if rows.is_empty() {
            return Err(IndexError::InvalidDateRange {
                start,
                end,
                reason: "no computed index days fall inside the window".into(),
            });
        }

        let base = rows[0].cumulative_value;
        for row in &mut rows {
            row.index_level = round2(row.cumulative_value * 100.0 / base);
        }

        Ok(Self {
            rows,
            date_format: date_format.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_window_row_rebases_to_100() {
        let returns = vec![
            (date(2020, 2, 3), 0.01),
            (date(2020, 2, 4), 0.02),
            (date(2020, 2, 5), -0.01),
        ];
        let series =
            IndexSeries::from_returns(&returns, date(2020, 2, 3), date(2020, 2, 5), "%Y-%m-%d")
                .unwrap();
        assert_eq!(series.rows[0].index_level, 100.0);
    }

    #[test]
    fn rebase_is_window_relative() {
        let returns = vec![
            (date(2020, 2, 3), 0.10),
            (date(2020, 2, 4), 0.05),
            (date(2020, 2, 5), 0.05),
        ];
        // Window starts on the 4th: the 10% on the 3rd is divided out.
        let series =
            IndexSeries::from_returns(&returns, date(2020, 2, 4), date(2020, 2, 5), "%Y-%m-%d")
                .unwrap();
        assert_eq!(series.rows[0].index_level, 100.0);
        assert_relative_eq!(
            series.rows[1].index_level,
            (100.0f64 * 0.05f64.exp() * 100.0).round() / 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn compounding_is_exp_of_cumulative_sum() {
        let returns = vec![(date(2020, 2, 3), 0.0), (date(2020, 2, 4), 0.05)];
        let series =
            IndexSeries::from_returns(&returns, date(2020, 2, 3), date(2020, 2, 4), "%Y-%m-%d")
                .unwrap();
        // 100 * e^0.05 = 105.127..., rounded to 105.13.
        assert_eq!(series.rows[1].index_level, 105.13);
    }

    #[test]
    fn non_finite_returns_contribute_zero() {
        let returns = vec![
            (date(2020, 2, 3), 0.0),
            (date(2020, 2, 4), f64::NAN),
            (date(2020, 2, 5), 0.0),
        ];
        let series =
            IndexSeries::from_returns(&returns, date(2020, 2, 3), date(2020, 2, 5), "%Y-%m-%d")
                .unwrap();
        assert_eq!(series.rows[1].daily_return, 0.0);
        assert_eq!(series.rows[2].index_level, 100.0);
    }

    #[test]
    fn empty_window_is_invalid_date_range() {
        let returns = vec![(date(2020, 2, 3), 0.01)];
        let err =
            IndexSeries::from_returns(&returns, date(2021, 1, 1), date(2021, 12, 31), "%Y-%m-%d")
                .unwrap_err();
        assert!(matches!(err, IndexError::InvalidDateRange { .. }));
    }

    #[test]
    fn levels_round_to_two_decimals() {
        let returns = vec![(date(2020, 2, 3), 0.0), (date(2020, 2, 4), 0.012345)];
        let series =
            IndexSeries::from_returns(&returns, date(2020, 2, 3), date(2020, 2, 4), "%Y-%m-%d")
                .unwrap();
        let level = series.rows[1].index_level;
        assert_relative_eq!(level, (level * 100.0).round() / 100.0, max_relative = 1e-12);
    }
}
