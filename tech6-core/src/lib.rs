//! Tech6 Core: feed model, change calculator, sector catalog, dashboard view-model.
//!
//! This crate contains everything the front-ends share:
//! - Domain types (snapshots, holdings, the reference date)
//! - The "percent change since reference date" calculator
//! - Chart time-range filtering
//! - Lenient feed decoding and feed sources (HTTP with fallback, local file)
//! - The sector catalog and ticker name table
//! - The immutable dashboard view-model and display formatting
//! - TOML configuration

pub mod catalog;
pub mod change;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod feed;
pub mod range;

pub use catalog::{SectorCatalog, SectorDef};
pub use change::compute_change;
pub use config::{ConfigError, Tech6Config};
pub use dashboard::{format_change, format_yen, Dashboard, NikkeiBadge, SectorCard};
pub use data::{FeedError, FeedSource};
pub use domain::{Holding, Snapshot, TickerEntry, NIKKEI_KEY, REFERENCE_DATE};
pub use feed::{FeedDocument, SectorQuote};
pub use range::TimeRange;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types the TUI worker hands across threads
    /// are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Snapshot>();
        require_sync::<Snapshot>();
        require_send::<FeedDocument>();
        require_sync::<FeedDocument>();
        require_send::<Dashboard>();
        require_sync::<Dashboard>();
        require_send::<SectorCatalog>();
        require_sync::<SectorCatalog>();
        require_send::<FeedError>();
        require_send::<Box<dyn FeedSource>>();
        require_sync::<Box<dyn FeedSource>>();
    }
}
