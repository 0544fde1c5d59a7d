//! Feed source trait and structured error types.
//!
//! The FeedSource trait abstracts over where the feed document comes from
//! (HTTP with a fallback path, or a local file) so front-ends can swap
//! implementations and tests can run without a network.

use std::path::PathBuf;
use thiserror::Error;

use crate::feed::FeedDocument;

/// Structured error types for feed retrieval.
///
/// Displayed verbatim by both the CLI and the TUI.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("feed is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("cannot read feed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    /// Short category label for error histories.
    pub fn category(&self) -> &'static str {
        match self {
            FeedError::Network(_) | FeedError::HttpStatus { .. } => "network",
            FeedError::InvalidJson(_) => "data",
            FeedError::Io { .. } => "io",
        }
    }
}

/// Trait for feed sources.
///
/// A source performs exactly one retrieval per `load` call: no retries, no
/// caching. Callers decide what to do with the previous state on failure.
pub trait FeedSource: Send + Sync {
    /// Human-readable description of where the feed is read from.
    fn name(&self) -> &str;

    /// Retrieve and decode the feed document.
    fn load(&self) -> Result<FeedDocument, FeedError>;
}
