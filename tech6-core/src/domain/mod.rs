//! Domain types for Tech6

pub mod holding;
pub mod snapshot;

pub use holding::{Holding, TickerEntry};
pub use snapshot::Snapshot;

/// Series key for the Nikkei 225 index field of a snapshot.
pub const NIKKEI_KEY: &str = "Nikkei225";

/// Tax-policy announcement date used as the baseline for "change since" figures.
pub const REFERENCE_DATE: &str = "2025-11-26";
