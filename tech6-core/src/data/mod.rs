//! Feed retrieval

pub mod file;
pub mod http;
pub mod provider;

pub use file::FileFeedSource;
pub use http::{HttpFeedSource, HttpResponse, HttpTransport, ReqwestTransport};
pub use provider::{FeedError, FeedSource};

use std::time::Duration;

use crate::config::FeedConfig;

/// True when `location` should be fetched over the network.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Build the source described by the config.
///
/// An explicit `location` wins: URLs become the primary HTTP path (the
/// configured fallback still applies), anything else is a local file.
/// Without a location the configured base URL and paths are used.
pub fn open_source(config: &FeedConfig) -> Result<Box<dyn FeedSource>, FeedError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match config.location.as_deref() {
        Some(location) if !is_remote(location) => Ok(Box::new(FileFeedSource::new(location))),
        Some(url) => Ok(Box::new(HttpFeedSource::new(
            url,
            config.fallback_url(),
            timeout,
        )?)),
        None => Ok(Box::new(HttpFeedSource::new(
            config.primary_url(),
            config.fallback_url(),
            timeout,
        )?)),
    }
}
