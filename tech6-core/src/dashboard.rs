//! Dashboard view-model.
//!
//! A [`Dashboard`] is built in one go from a feed document and is never
//! patched afterwards: front-ends hold one value and swap it for a new one
//! after every successful load, keeping the old one when a load fails.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::catalog::SectorCatalog;
use crate::change::compute_change;
use crate::domain::{Holding, Snapshot, NIKKEI_KEY};
use crate::feed::FeedDocument;
use crate::range::TimeRange;

/// Placeholder shown instead of a non-finite figure.
pub const NO_VALUE: &str = "—";

/// One sector tile.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorCard {
    pub key: String,
    pub name: String,
    pub icon: String,
    /// Percent change since the reference date, derived from history.
    pub change_since_reference: f64,
    /// Latest daily change reported by the feed.
    pub daily_change: f64,
    pub holdings: Vec<Holding>,
}

/// Nikkei 225 header badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NikkeiBadge {
    pub price: f64,
    pub change_since_reference: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub cards: Vec<SectorCard>,
    pub nikkei: Option<NikkeiBadge>,
    pub history: Vec<Snapshot>,
    pub last_updated: Option<String>,
    pub reference_date: String,
}

impl Dashboard {
    /// Initial state before any feed arrives.
    pub fn empty(catalog: &SectorCatalog, reference_date: &str) -> Self {
        Self::build(&FeedDocument::default(), catalog, reference_date)
    }

    /// Derive every figure from one feed document.
    ///
    /// Cards follow catalog order. Feed sectors unknown to the catalog are
    /// ignored; catalog sectors missing from the feed keep zero changes and
    /// no holdings.
    pub fn build(feed: &FeedDocument, catalog: &SectorCatalog, reference_date: &str) -> Self {
        let history = feed.history().to_vec();

        let cards = catalog
            .sectors
            .iter()
            .map(|def| {
                let quote = feed.sector(&def.key);
                SectorCard {
                    key: def.key.clone(),
                    name: def.name.clone(),
                    icon: def.icon.clone(),
                    change_since_reference: compute_change(&history, &def.key, reference_date),
                    daily_change: quote.map_or(0.0, |q| q.change_percent),
                    holdings: quote.map(|q| q.holdings.clone()).unwrap_or_default(),
                }
            })
            .collect();

        let nikkei = feed.nikkei_current_price.map(|price| NikkeiBadge {
            price,
            change_since_reference: compute_change(&history, NIKKEI_KEY, reference_date),
        });

        Self {
            cards,
            nikkei,
            history,
            last_updated: feed.last_updated.clone(),
            reference_date: reference_date.to_string(),
        }
    }

    pub fn card(&self, key: &str) -> Option<&SectorCard> {
        self.cards.iter().find(|c| c.key == key)
    }

    /// History window for the trend chart.
    pub fn chart_history(&self, range: TimeRange, today: NaiveDate) -> Vec<&Snapshot> {
        range.filter(&self.history, today)
    }

    /// `last_updated` formatted for display, or an empty string.
    pub fn last_updated_display(&self) -> String {
        self.last_updated
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default()
    }
}

/// `+1.23%`, `-1.23%`, `0.00%`; `—` when the figure is not finite.
pub fn format_change(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    // Normalize -0.0 so it never renders as "-0.00%".
    let value = if value == 0.0 { 0.0 } else { value };
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Yen amount with thousands separators and at most three decimals:
/// `¥38,500.5`.
pub fn format_yen(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}¥{grouped}")
    } else {
        format!("{sign}¥{grouped}.{frac}")
    }
}

/// Format the feed's update time as `YYYY/M/D H:MM:SS`.
///
/// Accepts RFC 3339 (converted to local time) and naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.fff]` stamps (taken as local already). Anything
/// else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y/%-m/%-d %-H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}
