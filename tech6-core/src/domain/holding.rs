//! Sector constituents as they appear in the feed.

use serde::{Deserialize, Serialize};

/// A `tickers` entry of the feed.
///
/// Older feeds list bare symbols; newer ones attach the latest daily change
/// and price. Both shapes are accepted and normalized into [`Holding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickerEntry {
    Symbol(String),
    Quote {
        ticker: String,
        #[serde(default)]
        change: Option<f64>,
        #[serde(default)]
        price: Option<f64>,
    },
}

/// Normalized constituent: the only shape display code sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    /// Daily percent change, when the feed supplied a quote.
    pub change: Option<f64>,
    /// Latest close in yen, when the feed supplied a quote.
    pub price: Option<f64>,
}

impl Holding {
    pub fn has_quote(&self) -> bool {
        self.price.is_some()
    }
}

impl From<TickerEntry> for Holding {
    fn from(entry: TickerEntry) -> Self {
        match entry {
            TickerEntry::Symbol(ticker) => Holding {
                ticker,
                change: None,
                price: None,
            },
            TickerEntry::Quote {
                ticker,
                change,
                price,
            } => Holding {
                ticker,
                change,
                price,
            },
        }
    }
}
