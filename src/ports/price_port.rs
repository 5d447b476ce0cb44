//! Price data source port trait.

use crate::domain::error::IndexError;
use crate::domain::price_table::PriceTable;
use chrono::NaiveDate;

pub trait PricePort {
    fn fetch_prices(&self) -> Result<PriceTable, IndexError>;

    /// Default implementation: derives the range from a full fetch.
    fn data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, IndexError> {
        Ok(self.fetch_prices()?.date_range())
    }
}
