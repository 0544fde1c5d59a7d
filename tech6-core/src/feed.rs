//! The feed document: sector quotes, normalized history, update time and
//! the Nikkei 225 price.
//!
//! Decoding is lenient field by field. The producer is an external batch job
//! and older documents lack `history` or the Nikkei price entirely, so each
//! top-level field is decoded on its own and a missing or malformed one is
//! simply absent. Only a body that is not JSON at all is an error.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::data::FeedError;
use crate::domain::{Holding, Snapshot, TickerEntry};

/// Per-sector block of the feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorQuote {
    /// Average daily change of the sector's constituents, in percent.
    pub change_percent: f64,
    pub holdings: Vec<Holding>,
}

impl SectorQuote {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let change_percent = object
            .get("change_percent")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let holdings = object
            .get("tickers")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| serde_json::from_value::<TickerEntry>(e.clone()).ok())
                    .map(Holding::from)
                    .collect()
            })
            .unwrap_or_default();
        Some(Self {
            change_percent,
            holdings,
        })
    }
}

/// Decoded feed. Every field is independently optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedDocument {
    pub sectors: Option<BTreeMap<String, SectorQuote>>,
    pub history: Option<Vec<Snapshot>>,
    pub last_updated: Option<String>,
    pub nikkei_current_price: Option<f64>,
}

impl FeedDocument {
    /// Parse a feed body.
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FeedError::InvalidJson(e.to_string()))?;
        Ok(Self::from_value(&value))
    }

    /// Decode an already-parsed JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let sectors = value.get("sectors").and_then(Value::as_object).map(|map| {
            map.iter()
                .filter_map(|(key, v)| SectorQuote::from_value(v).map(|q| (key.clone(), q)))
                .collect::<BTreeMap<_, _>>()
        });

        let history = value.get("history").and_then(Value::as_array).map(|rows| {
            let snapshots: Vec<Snapshot> = rows.iter().filter_map(Snapshot::from_value).collect();
            if snapshots.len() != rows.len() {
                debug!(
                    skipped = rows.len() - snapshots.len(),
                    "dropped history rows that are not objects"
                );
            }
            snapshots
        });

        let last_updated = value
            .get("last_updated")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from);

        // A zero price is how the producer says "unknown".
        let nikkei_current_price = value
            .get("nikkei_current_price")
            .and_then(Value::as_f64)
            .filter(|p| *p != 0.0);

        Self {
            sectors,
            history,
            last_updated,
            nikkei_current_price,
        }
    }

    /// History rows, or an empty slice when the feed had none.
    pub fn history(&self) -> &[Snapshot] {
        self.history.as_deref().unwrap_or(&[])
    }

    pub fn sector(&self, key: &str) -> Option<&SectorQuote> {
        self.sectors.as_ref()?.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "sectors": {
            "Semi": {
                "change_percent": 1.23,
                "tickers": [
                    "8035.T",
                    {"ticker": "6857.T", "change": -0.5, "price": 9120.0},
                    {"change": 3.0},
                    42
                ]
            },
            "Bio": { "tickers": [] }
        },
        "history": [
            {"date": "2025-11-26", "Nikkei225": 10.0, "Semi": 20.0},
            {"Semi": 1.0},
            {"date": "2025-11-27", "Nikkei225": 11.0, "Semi": 22.0}
        ],
        "last_updated": "2025-11-27 15:30:00",
        "nikkei_current_price": 49559.07
    }"#;

    #[test]
    fn decodes_full_document() {
        let feed = FeedDocument::from_json(FULL).unwrap();

        let semi = feed.sector("Semi").unwrap();
        assert_eq!(semi.change_percent, 1.23);
        // Malformed ticker entries are skipped, both shapes kept.
        assert_eq!(semi.holdings.len(), 2);
        assert_eq!(semi.holdings[0].ticker, "8035.T");
        assert!(!semi.holdings[0].has_quote());
        assert_eq!(semi.holdings[1].price, Some(9120.0));

        let bio = feed.sector("Bio").unwrap();
        assert_eq!(bio.change_percent, 0.0);
        assert!(bio.holdings.is_empty());

        // The undated row is kept in place.
        assert_eq!(feed.history().len(), 3);
        assert_eq!(feed.history()[1].date, "");
        assert_eq!(feed.last_updated.as_deref(), Some("2025-11-27 15:30:00"));
        assert_eq!(feed.nikkei_current_price, Some(49559.07));
    }

    #[test]
    fn malformed_field_does_not_poison_others() {
        let feed = FeedDocument::from_json(
            r#"{"sectors": {"Space": {"change_percent": -2.0}}, "history": "oops", "nikkei_current_price": "high"}"#,
        )
        .unwrap();
        assert_eq!(feed.sector("Space").unwrap().change_percent, -2.0);
        assert!(feed.history.is_none());
        assert!(feed.history().is_empty());
        assert!(feed.nikkei_current_price.is_none());
        assert!(feed.last_updated.is_none());
    }

    #[test]
    fn trailing_undated_row_is_current() {
        use crate::compute_change;

        let feed = FeedDocument::from_json(
            r#"{"history": [
                {"date": "2025-11-26", "Semi": 10.0},
                {"date": "2025-12-01", "Semi": 21.0},
                {"Semi": 32.0}
            ]}"#,
        )
        .unwrap();
        let history = feed.history();
        assert_eq!(history.len(), 3);
        let change = compute_change(history, "Semi", "2025-11-26");
        assert!((change - 22.0 / 110.0 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn empty_object_is_all_absent() {
        let feed = FeedDocument::from_json("{}").unwrap();
        assert_eq!(feed, FeedDocument::default());
    }

    #[test]
    fn zero_price_is_absent() {
        let feed = FeedDocument::from_json(r#"{"nikkei_current_price": 0}"#).unwrap();
        assert!(feed.nikkei_current_price.is_none());
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = FeedDocument::from_json("<html>404</html>").unwrap_err();
        assert!(matches!(err, FeedError::InvalidJson(_)));
    }

    #[test]
    fn top_level_array_decodes_to_nothing() {
        let feed = FeedDocument::from_json("[1, 2, 3]").unwrap();
        assert_eq!(feed, FeedDocument::default());
    }
}
