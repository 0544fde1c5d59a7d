//! Percent change of a series since the reference date.
//!
//! Every consumer (sector cards, the Nikkei badge, the CLI `change` command)
//! goes through [`compute_change`]; nothing else re-derives the figure.

use std::borrow::Borrow;

use crate::domain::Snapshot;

/// Percent change of `key` between the reference snapshot and the latest one.
///
/// - The reference snapshot is the first one whose date is `>= reference_date`
///   (plain string comparison of ISO dates). When every snapshot predates the
///   reference date, the last snapshot is used, which makes the result `0`
///   unless its value is `-100`.
/// - The current snapshot is always the last one.
/// - A missing value reads as `0`.
///
/// Values are baseline-100 deltas, so the denominator is `100 + v_ref`.
/// `v_ref == -100` is not guarded: the result is non-finite (NaN when the
/// current value is also `-100`), and display code renders it as
/// "no meaningful change".
///
/// Total over all inputs: an empty series returns `0`.
pub fn compute_change(series: &[Snapshot], key: &str, reference_date: &str) -> f64 {
    let Some(current) = series.last() else {
        return 0.0;
    };
    let reference = reference_snapshot(series, reference_date).unwrap_or(current);

    let v_ref = reference.value(key).unwrap_or(0.0);
    let v_current = current.value(key).unwrap_or(0.0);
    (v_current - v_ref) / (100.0 + v_ref) * 100.0
}

/// First snapshot dated on or after `reference_date`.
pub fn reference_snapshot<'a>(series: &'a [Snapshot], reference_date: &str) -> Option<&'a Snapshot> {
    reference_index(series, reference_date).map(|i| &series[i])
}

/// Position of the reference snapshot. Also places the chart marker, which
/// works on a borrowed window of rows.
pub fn reference_index<S: Borrow<Snapshot>>(series: &[S], reference_date: &str) -> Option<usize> {
    series
        .iter()
        .position(|s| s.borrow().date.as_str() >= reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NIKKEI_KEY, REFERENCE_DATE};

    fn sample() -> Vec<Snapshot> {
        vec![
            Snapshot::new("2025-01-01").with("S", 0.0),
            Snapshot::new("2025-11-26").with("S", 10.0),
            Snapshot::new("2025-12-01").with("S", 20.0),
        ]
    }

    #[test]
    fn empty_series_is_zero() {
        assert_eq!(compute_change(&[], "S", REFERENCE_DATE), 0.0);
    }

    #[test]
    fn exact_reference_match() {
        let change = compute_change(&sample(), "S", "2025-11-26");
        assert!((change - 10.0 / 110.0 * 100.0).abs() < 1e-12);
        assert!((change - 9.090909).abs() < 1e-6);
    }

    #[test]
    fn first_on_or_after_not_nearest() {
        let series = vec![
            Snapshot::new("2025-11-20").with("S", 0.0),
            Snapshot::new("2025-11-28").with("S", 5.0),
            Snapshot::new("2025-12-05").with("S", 15.0),
        ];
        // 11-20 is closer to 11-25 than 11-28, but only >= qualifies.
        let change = compute_change(&series, "S", "2025-11-25");
        assert!((change - 10.0 / 105.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn reference_after_last_snapshot_is_zero() {
        assert_eq!(compute_change(&sample(), "S", "2026-03-01"), 0.0);
    }

    #[test]
    fn reference_equal_to_last_is_zero() {
        assert_eq!(compute_change(&sample(), "S", "2025-12-01"), 0.0);
    }

    #[test]
    fn missing_key_reads_as_zero() {
        assert_eq!(compute_change(&sample(), "Quantum", "2025-11-26"), 0.0);

        // Missing only on the reference side: v_ref = 0.
        let series = vec![
            Snapshot::new("2025-11-26"),
            Snapshot::new("2025-12-01").with(NIKKEI_KEY, 4.0),
        ];
        assert!((compute_change(&series, NIKKEI_KEY, REFERENCE_DATE) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn negative_movement() {
        let series = vec![
            Snapshot::new("2025-11-26").with("S", 20.0),
            Snapshot::new("2025-12-10").with("S", -4.0),
        ];
        let change = compute_change(&series, "S", REFERENCE_DATE);
        assert!((change - (-24.0 / 120.0 * 100.0)).abs() < 1e-12);
    }

    #[test]
    fn minus_hundred_reference_is_not_finite() {
        let series = vec![
            Snapshot::new("2025-11-26").with("S", -100.0),
            Snapshot::new("2025-12-01").with("S", 5.0),
        ];
        assert!(!compute_change(&series, "S", REFERENCE_DATE).is_finite());
    }

    #[test]
    fn minus_hundred_on_single_snapshot_is_nan() {
        let series = vec![Snapshot::new("2025-11-26").with("S", -100.0)];
        assert!(compute_change(&series, "S", REFERENCE_DATE).is_nan());
        // Fallback to the last row reads the same -100 on both ends.
        assert!(compute_change(&series, "S", "2099-01-01").is_nan());
        assert_eq!(
            crate::format_change(compute_change(&series, "S", REFERENCE_DATE)),
            crate::dashboard::NO_VALUE
        );
    }

    #[test]
    fn reference_index_matches_lookup() {
        let series = sample();
        assert_eq!(reference_index(&series, "2025-11-26"), Some(1));
        assert_eq!(reference_index(&series, "2025-11-27"), Some(2));
        assert_eq!(reference_index(&series, "2026-01-01"), None);
        assert_eq!(
            reference_snapshot(&series, "2025-06-01").map(|s| s.date.as_str()),
            Some("2025-11-26")
        );
    }
}
