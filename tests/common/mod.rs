#![allow(dead_code)]

use capindex::domain::calendar::is_business_day;
use capindex::domain::error::IndexError;
pub use capindex::domain::price_table::{PriceRow, PriceTable};
use capindex::ports::price_port::PricePort;
use chrono::{Duration, NaiveDate};

pub struct MockPricePort {
    pub table: PriceTable,
}

impl MockPricePort {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(&self) -> Result<PriceTable, IndexError> {
        Ok(self.table.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn weekdays(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut d = from;
    while d <= to {
        if is_business_day(d) {
            dates.push(d);
        }
        d += Duration::days(1);
    }
    dates
}

/// Price table over every weekday in [from, to]: constant per-stock prices
/// with selective per-day overrides (`None` punches a gap).
pub fn make_table(
    stocks: &[&str],
    base_prices: &[f64],
    from: NaiveDate,
    to: NaiveDate,
    overrides: &[(NaiveDate, &str, Option<f64>)],
) -> PriceTable {
    let names: Vec<String> = stocks.iter().map(|s| s.to_string()).collect();
    let rows = weekdays(from, to)
        .into_iter()
        .map(|d| {
            let mut prices: Vec<Option<f64>> =
                base_prices.iter().copied().map(Some).collect();
            for (od, stock, value) in overrides {
                if *od == d {
                    let col = stocks.iter().position(|s| s == stock).unwrap();
                    prices[col] = *value;
                }
            }
            PriceRow { date: d, prices }
        })
        .collect();
    PriceTable::new(names, rows)
}

/// Wide CSV text for the same table shape, for exercising the file adapters.
pub fn make_csv(
    stocks: &[&str],
    base_prices: &[f64],
    from: NaiveDate,
    to: NaiveDate,
    date_format: &str,
) -> String {
    let mut out = String::from("Date");
    for stock in stocks {
        out.push(',');
        out.push_str(stock);
    }
    out.push('\n');
    for d in weekdays(from, to) {
        out.push_str(&d.format(date_format).to_string());
        for price in base_prices {
            out.push_str(&format!(",{}", price));
        }
        out.push('\n');
    }
    out
}
