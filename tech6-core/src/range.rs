//! Chart time ranges.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::Snapshot;

/// Window of history shown on the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "YTD")]
    YearToDate,
    #[default]
    #[serde(rename = "ALL")]
    All,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time range '{0}' (expected 1M, 6M, YTD or ALL)")]
pub struct ParseRangeError(String);

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 4] = [
        TimeRange::OneMonth,
        TimeRange::SixMonths,
        TimeRange::YearToDate,
        TimeRange::All,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1M",
            TimeRange::SixMonths => "6M",
            TimeRange::YearToDate => "YTD",
            TimeRange::All => "ALL",
        }
    }

    pub fn next(self) -> TimeRange {
        match self {
            TimeRange::OneMonth => TimeRange::SixMonths,
            TimeRange::SixMonths => TimeRange::YearToDate,
            TimeRange::YearToDate => TimeRange::All,
            TimeRange::All => TimeRange::OneMonth,
        }
    }

    /// First date included in the window, or `None` for `ALL`.
    ///
    /// Month arithmetic clamps to the end of the target month
    /// (March 31 minus one month is February 28/29).
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeRange::OneMonth => Some(sub_months(today, 1)),
            TimeRange::SixMonths => Some(sub_months(today, 6)),
            TimeRange::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            TimeRange::All => None,
        }
    }

    /// Snapshots dated on or after the window start, in series order.
    ///
    /// `ALL` returns every snapshot untouched. For the other ranges a
    /// snapshot with an unparseable date is dropped. There is no end bound.
    pub fn filter(self, series: &[Snapshot], today: NaiveDate) -> Vec<&Snapshot> {
        match self.start_date(today) {
            None => series.iter().collect(),
            Some(start) => series
                .iter()
                .filter(|s| s.parsed_date().is_some_and(|d| d >= start))
                .collect(),
        }
    }
}

fn sub_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TimeRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(TimeRange::OneMonth),
            "6M" => Ok(TimeRange::SixMonths),
            "YTD" => Ok(TimeRange::YearToDate),
            "ALL" => Ok(TimeRange::All),
            _ => Err(ParseRangeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn two_year_series() -> Vec<Snapshot> {
        vec![
            Snapshot::new("2025-11-03").with("Semi", 1.0),
            Snapshot::new("2025-12-29").with("Semi", 2.0),
            Snapshot::new("2026-01-05").with("Semi", 3.0),
            Snapshot::new("2026-09-30").with("Semi", 4.0),
            Snapshot::new("2026-10-16").with("Semi", 5.0),
        ]
    }

    #[test]
    fn all_is_identity() {
        let series = two_year_series();
        let filtered = TimeRange::All.filter(&series, d(2026, 10, 19));
        assert_eq!(filtered.len(), series.len());
        for (a, b) in filtered.iter().zip(series.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn ytd_keeps_current_year_in_order() {
        let series = two_year_series();
        let filtered = TimeRange::YearToDate.filter(&series, d(2026, 10, 19));
        let dates: Vec<&str> = filtered.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-01-05", "2026-09-30", "2026-10-16"]);
    }

    #[test]
    fn one_month_is_inclusive() {
        let series = two_year_series();
        let filtered = TimeRange::OneMonth.filter(&series, d(2026, 10, 30));
        let dates: Vec<&str> = filtered.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-09-30", "2026-10-16"]);
    }

    #[test]
    fn six_months_window() {
        assert_eq!(
            TimeRange::SixMonths.start_date(d(2026, 4, 15)),
            Some(d(2025, 10, 15))
        );
    }

    #[test]
    fn month_subtraction_clamps() {
        assert_eq!(
            TimeRange::OneMonth.start_date(d(2026, 3, 31)),
            Some(d(2026, 2, 28))
        );
        assert_eq!(
            TimeRange::OneMonth.start_date(d(2028, 3, 31)),
            Some(d(2028, 2, 29))
        );
    }

    #[test]
    fn unparseable_dates_only_survive_all() {
        let series = vec![Snapshot::new("n/a"), Snapshot::new("2026-10-01")];
        assert_eq!(TimeRange::YearToDate.filter(&series, d(2026, 10, 19)).len(), 1);
        assert_eq!(TimeRange::All.filter(&series, d(2026, 10, 19)).len(), 2);
    }

    #[test]
    fn parse_and_cycle() {
        assert_eq!("ytd".parse::<TimeRange>(), Ok(TimeRange::YearToDate));
        assert_eq!(" 1m ".parse::<TimeRange>(), Ok(TimeRange::OneMonth));
        assert!("2W".parse::<TimeRange>().is_err());

        let mut range = TimeRange::OneMonth;
        for expected in ["6M", "YTD", "ALL", "1M"] {
            range = range.next();
            assert_eq!(range.tag(), expected);
        }
    }

    #[test]
    fn serde_uses_tags() {
        assert_eq!(serde_json::to_string(&TimeRange::YearToDate).unwrap(), r#""YTD""#);
        let parsed: TimeRange = serde_json::from_str(r#""6M""#).unwrap();
        assert_eq!(parsed, TimeRange::SixMonths);
    }
}
