//! Weight scheduling: the previous month's top-3 selection, weighted
//! 50/25/25, applied across the current month's business days.

use crate::domain::selection::ConstituentSelection;
use chrono::NaiveDate;

/// Rank weights in percent: 50 for the largest constituent, 25 for the
/// second and third.
pub const RANK_WEIGHTS: [f64; 3] = [50.0, 25.0, 25.0];

/// The weights active on one business day: the selected stocks paired with
/// their percent weight. Every other stock is implicitly weighted 0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    entries: Vec<(String, f64)>,
}

impl WeightVector {
    pub fn from_selection(selection: &ConstituentSelection) -> Self {
        Self {
            entries: selection
                .ranked
                .iter()
                .zip(RANK_WEIGHTS)
                .map(|(stock, weight)| (stock.clone(), weight))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn weight(&self, stock: &str) -> f64 {
        self.entries
            .iter()
            .find(|(s, _)| s == stock)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// One calendar month of business days together with the selection made at
/// that month's close.
#[derive(Debug, Clone)]
pub struct MonthClose {
    pub dates: Vec<NaiveDate>,
    pub selection: ConstituentSelection,
}

/// Builds the per-day weight schedule from chronologically ordered months.
///
/// The first month is inception and emits no days. Every later month's
/// business days carry the selection made at the close of the month before
/// it. A forward-fill pass then closes each month boundary: a new selection
/// becomes effective only after the close of the incoming month's first
/// business day, so that day keeps the weights of the outgoing month's last
/// day.
pub fn build_schedule(months: &[MonthClose]) -> Vec<(NaiveDate, WeightVector)> {
    let mut schedule = Vec::new();
    let mut month_starts = Vec::new();

    for i in 1..months.len() {
        let lagged = WeightVector::from_selection(&months[i - 1].selection);
        month_starts.push(schedule.len());
        for &date in &months[i].dates {
            schedule.push((date, lagged.clone()));
        }
    }

    forward_fill_boundaries(&mut schedule, &month_starts);
    schedule
}

/// For each transition between two scheduled months, copies the outgoing
/// month's last-day weights onto the incoming month's first day. The first
/// scheduled month has no weighted predecessor and is left untouched.
fn forward_fill_boundaries(schedule: &mut [(NaiveDate, WeightVector)], month_starts: &[usize]) {
    for &start in month_starts.iter().skip(1) {
        if start == 0 || start >= schedule.len() {
            continue;
        }
        let carried = schedule[start - 1].1.clone();
        schedule[start].1 = carried;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn selection(names: &[&str]) -> ConstituentSelection {
        ConstituentSelection {
            ranked: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn month(dates: &[NaiveDate], sel: &[&str]) -> MonthClose {
        MonthClose {
            dates: dates.to_vec(),
            selection: selection(sel),
        }
    }

    #[test]
    fn weight_vector_assigns_50_25_25() {
        let wv = WeightVector::from_selection(&selection(&["D", "C", "B"]));
        assert_eq!(wv.weight("D"), 50.0);
        assert_eq!(wv.weight("C"), 25.0);
        assert_eq!(wv.weight("B"), 25.0);
        assert_eq!(wv.weight("A"), 0.0);
        assert_eq!(wv.total(), 100.0);
    }

    #[test]
    fn short_selection_sums_below_100() {
        let wv = WeightVector::from_selection(&selection(&["D", "C"]));
        assert_eq!(wv.total(), 75.0);
    }

    #[test]
    fn inception_month_emits_no_days() {
        let months = vec![month(&[date(2020, 1, 31)], &["A", "B", "C"])];
        assert!(build_schedule(&months).is_empty());
    }

    #[test]
    fn second_month_carries_first_months_selection_throughout() {
        let months = vec![
            month(&[date(2020, 1, 30), date(2020, 1, 31)], &["D", "C", "B"]),
            month(&[date(2020, 2, 3), date(2020, 2, 4)], &["A", "B", "C"]),
        ];
        let schedule = build_schedule(&months);
        assert_eq!(schedule.len(), 2);
        for (_, wv) in &schedule {
            assert_eq!(wv.weight("D"), 50.0);
            assert_eq!(wv.weight("C"), 25.0);
            assert_eq!(wv.weight("B"), 25.0);
            assert_eq!(wv.weight("A"), 0.0);
        }
    }

    #[test]
    fn boundary_day_keeps_outgoing_months_weights() {
        let months = vec![
            month(&[date(2020, 1, 31)], &["D", "C", "B"]),
            month(&[date(2020, 2, 3), date(2020, 2, 28)], &["A", "B", "C"]),
            month(&[date(2020, 3, 2), date(2020, 3, 3)], &["B", "C", "D"]),
        ];
        let schedule = build_schedule(&months);
        assert_eq!(schedule.len(), 4);

        // March 2nd is the first day after February's close: February's
        // active weights (January's selection) still apply.
        let (d, wv) = &schedule[2];
        assert_eq!(*d, date(2020, 3, 2));
        assert_eq!(wv.weight("D"), 50.0);
        assert_eq!(wv.weight("A"), 0.0);

        // From March 3rd the February-close selection is effective.
        let (d, wv) = &schedule[3];
        assert_eq!(*d, date(2020, 3, 3));
        assert_eq!(wv.weight("A"), 50.0);
        assert_eq!(wv.weight("B"), 25.0);
        assert_eq!(wv.weight("C"), 25.0);
        assert_eq!(wv.weight("D"), 0.0);
    }

    #[test]
    fn schedule_never_uses_a_months_own_selection() {
        let months = vec![
            month(&[date(2020, 1, 31)], &["A", "B", "C"]),
            month(&[date(2020, 2, 3), date(2020, 2, 28)], &["D", "C", "B"]),
        ];
        let schedule = build_schedule(&months);
        // February's own selection (D first) must not appear during February.
        for (_, wv) in &schedule {
            assert_eq!(wv.weight("A"), 50.0);
            assert_eq!(wv.weight("D"), 0.0);
        }
    }
}
