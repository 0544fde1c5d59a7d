//! Local-file feed source, for snapshots saved to disk or produced by a
//! local batch run.

use std::path::PathBuf;
use tracing::info;

use super::provider::{FeedError, FeedSource};
use crate::feed::FeedDocument;

pub struct FileFeedSource {
    path: PathBuf,
    label: String,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<FeedDocument, FeedError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        let feed = FeedDocument::from_json(&body)?;
        info!(path = %self.label, history = feed.history().len(), "feed loaded from file");
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_data.json");
        std::fs::write(&path, r#"{"nikkei_current_price": 38500.5}"#).unwrap();

        let feed = FileFeedSource::new(&path).load().unwrap();
        assert_eq!(feed.nikkei_current_price, Some(38500.5));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = FileFeedSource::new("/nonexistent/stock_data.json");
        let err = source.load().unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
        assert_eq!(err.category(), "io");
    }
}
