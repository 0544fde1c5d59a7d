//! Snapshot: one dated observation of every tracked series.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One history entry of the feed.
///
/// Values are normalized index deltas, not prices: `100 + value` is the
/// baseline-100 level of the series on `date`. The date stays a string so
/// that reference lookups compare ISO dates lexicographically, the same way
/// the feed producer writes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl Snapshot {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Value of a series on this date, if the feed recorded one.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Calendar date of this snapshot. `None` when the feed sent something
    /// that is not a `YYYY-MM-DD` prefixed string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Decode a history entry from the raw feed.
    ///
    /// Only non-object entries are rejected. A missing or non-string `date`
    /// becomes an empty date, which never matches a reference lookup but
    /// still counts as a row. Non-numeric fields are ignored so that one odd
    /// column cannot drop the whole row.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let date = object
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let values = object
            .iter()
            .filter(|(key, _)| key.as_str() != "date")
            .filter_map(|(key, v)| v.as_f64().map(|n| (key.clone(), n)))
            .collect();
        Some(Self { date, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_numeric_fields_only() {
        let raw = json!({
            "date": "2025-11-26",
            "Nikkei225": 12.5,
            "Semi": -3,
            "note": "holiday",
            "Bio": null
        });
        let snap = Snapshot::from_value(&raw).unwrap();
        assert_eq!(snap.date, "2025-11-26");
        assert_eq!(snap.value("Nikkei225"), Some(12.5));
        assert_eq!(snap.value("Semi"), Some(-3.0));
        assert_eq!(snap.value("note"), None);
        assert_eq!(snap.value("Bio"), None);
        assert_eq!(snap.values.len(), 2);
    }

    #[test]
    fn undated_entry_keeps_its_values() {
        let snap = Snapshot::from_value(&json!({ "Semi": 1.0 })).unwrap();
        assert_eq!(snap.date, "");
        assert_eq!(snap.value("Semi"), Some(1.0));

        let snap = Snapshot::from_value(&json!({ "date": 20251126, "Bio": 2 })).unwrap();
        assert_eq!(snap.date, "");
        assert_eq!(snap.value("Bio"), Some(2.0));
        assert_eq!(snap.value("date"), None);

        assert!(Snapshot::from_value(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn parsed_date_accepts_timestamp_prefix() {
        let snap = Snapshot::new("2025-12-01T00:00:00");
        assert_eq!(snap.parsed_date(), NaiveDate::from_ymd_opt(2025, 12, 1));
        assert!(Snapshot::new("12/01/2025").parsed_date().is_none());
        assert!(Snapshot::new("").parsed_date().is_none());
    }

    #[test]
    fn serializes_flat() {
        let snap = Snapshot::new("2025-01-06").with("Semi", 1.5);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["date"], "2025-01-06");
        assert_eq!(json["Semi"], 1.5);
    }
}
