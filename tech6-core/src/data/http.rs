//! HTTP feed source.
//!
//! Requests the primary path first and, when it answers with a non-success
//! status, the fallback path. Both requests carry the same cache-busting
//! `t=<unix millis>` query parameter so static hosts never serve a stale
//! snapshot. A transport error on the primary path is returned as-is: the
//! fallback only covers "reachable but not there".

use std::time::Duration;
use tracing::{debug, info, warn};

use super::provider::{FeedError, FeedSource};
use crate::feed::FeedDocument;

/// Status and body of one GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET abstraction so the fallback logic is testable offline.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, FeedError>;
}

/// Blocking reqwest transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tech6/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FeedError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| FeedError::Network(format!("reading body from {url}: {e}")))?;
        Ok(HttpResponse { status, body })
    }
}

/// Feed served over HTTP(S) with a fallback path.
pub struct HttpFeedSource<T: HttpTransport = ReqwestTransport> {
    transport: T,
    primary: String,
    fallback: String,
}

impl HttpFeedSource<ReqwestTransport> {
    pub fn new(
        primary: impl Into<String>,
        fallback: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        Ok(Self::with_transport(
            ReqwestTransport::new(timeout)?,
            primary,
            fallback,
        ))
    }
}

impl<T: HttpTransport> HttpFeedSource<T> {
    pub fn with_transport(
        transport: T,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Fetch with an explicit cache-busting stamp.
    pub fn load_with_stamp(&self, stamp: i64) -> Result<FeedDocument, FeedError> {
        let primary_url = cache_busted(&self.primary, stamp);
        debug!(url = %primary_url, "requesting feed");
        let mut resp = self.transport.get(&primary_url)?;

        if !resp.is_success() {
            let fallback_url = cache_busted(&self.fallback, stamp);
            warn!(
                status = resp.status,
                url = %primary_url,
                fallback = %fallback_url,
                "primary feed path failed, trying fallback"
            );
            resp = self.transport.get(&fallback_url)?;
            if !resp.is_success() {
                return Err(FeedError::HttpStatus {
                    url: fallback_url,
                    status: resp.status,
                });
            }
        }

        let feed = FeedDocument::from_json(&resp.body)?;
        info!(
            history = feed.history().len(),
            sectors = feed.sectors.as_ref().map_or(0, |s| s.len()),
            "feed loaded"
        );
        Ok(feed)
    }
}

impl<T: HttpTransport> FeedSource for HttpFeedSource<T> {
    fn name(&self) -> &str {
        &self.primary
    }

    fn load(&self) -> Result<FeedDocument, FeedError> {
        self.load_with_stamp(chrono::Utc::now().timestamp_millis())
    }
}

/// Append `t=<stamp>` to a URL, respecting an existing query string.
pub fn cache_busted(url: &str, stamp: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport answering from a fixed table, recording requested URLs.
    struct MockTransport {
        routes: HashMap<String, HttpResponse>,
        requested: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(routes: &[(&str, u16, &str)]) -> Self {
            Self {
                routes: routes
                    .iter()
                    .map(|(url, status, body)| {
                        (
                            url.to_string(),
                            HttpResponse {
                                status: *status,
                                body: body.to_string(),
                            },
                        )
                    })
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl HttpTransport for MockTransport {
        fn get(&self, url: &str) -> Result<HttpResponse, FeedError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.routes
                .get(url)
                .cloned()
                .ok_or_else(|| FeedError::Network(format!("connection refused: {url}")))
        }
    }

    const BODY: &str = r#"{"last_updated": "2025-12-01 15:00:00"}"#;

    #[test]
    fn primary_success_skips_fallback() {
        let transport = MockTransport::new(&[("https://a/p.json?t=7", 200, BODY)]);
        let source = HttpFeedSource::with_transport(transport, "https://a/p.json", "https://a/f.json");
        let feed = source.load_with_stamp(7).unwrap();
        assert_eq!(feed.last_updated.as_deref(), Some("2025-12-01 15:00:00"));
        assert_eq!(source.transport.requested(), vec!["https://a/p.json?t=7"]);
    }

    #[test]
    fn non_success_primary_uses_fallback() {
        let transport = MockTransport::new(&[
            ("https://a/p.json?t=7", 404, "not found"),
            ("https://a/f.json?t=7", 200, BODY),
        ]);
        let source = HttpFeedSource::with_transport(transport, "https://a/p.json", "https://a/f.json");
        assert!(source.load_with_stamp(7).is_ok());
        assert_eq!(
            source.transport.requested(),
            vec!["https://a/p.json?t=7", "https://a/f.json?t=7"]
        );
    }

    #[test]
    fn both_paths_failing_is_an_error() {
        let transport = MockTransport::new(&[
            ("https://a/p.json?t=7", 404, ""),
            ("https://a/f.json?t=7", 500, ""),
        ]);
        let source = HttpFeedSource::with_transport(transport, "https://a/p.json", "https://a/f.json");
        match source.load_with_stamp(7) {
            Err(FeedError::HttpStatus { url, status }) => {
                assert_eq!(url, "https://a/f.json?t=7");
                assert_eq!(status, 500);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn network_error_on_primary_does_not_fall_back() {
        let transport = MockTransport::new(&[("https://a/f.json?t=7", 200, BODY)]);
        let source = HttpFeedSource::with_transport(transport, "https://a/p.json", "https://a/f.json");
        assert!(matches!(source.load_with_stamp(7), Err(FeedError::Network(_))));
        assert_eq!(source.transport.requested().len(), 1);
    }

    #[test]
    fn invalid_body_is_reported() {
        let transport = MockTransport::new(&[("https://a/p.json?t=7", 200, "<html>")]);
        let source = HttpFeedSource::with_transport(transport, "https://a/p.json", "https://a/f.json");
        assert!(matches!(source.load_with_stamp(7), Err(FeedError::InvalidJson(_))));
    }

    #[test]
    fn cache_buster_respects_existing_query() {
        assert_eq!(cache_busted("https://a/p.json", 42), "https://a/p.json?t=42");
        assert_eq!(cache_busted("https://a/p.json?v=2", 42), "https://a/p.json?v=2&t=42");
    }
}
