//! Monthly constituent selection: top three stocks by market cap on the
//! review month's last business day.

/// The stocks selected at one month's close, highest cap first.
///
/// Normally exactly three entries. A cutoff day where fewer than three
/// stocks have a price yields a shorter selection; the missing slots simply
/// contribute no weight downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituentSelection {
    pub ranked: Vec<String>,
}

/// Ranks `values` (parallel to `stocks`) descending and returns the top
/// three identifiers.
///
/// Tie-break: when two stocks have identical value on the cutoff day, the
/// identifier that sorts first lexicographically ranks higher. Stocks with
/// no value on the cutoff day are not eligible.
pub fn select_top3(stocks: &[String], values: &[Option<f64>]) -> ConstituentSelection {
    let mut candidates: Vec<(&String, f64)> = stocks
        .iter()
        .zip(values.iter())
        .filter_map(|(stock, value)| value.map(|v| (stock, v)))
        .collect();

    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    ConstituentSelection {
        ranked: candidates
            .into_iter()
            .take(3)
            .map(|(stock, _)| stock.clone())
            .collect(),
    }
}
