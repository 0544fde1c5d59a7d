//! Dashboard configuration, stored as TOML.
//!
//! Every field has a built-in default, so a missing config file is not an
//! error. Front-ends apply their command-line overrides on top of the loaded
//! value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::SectorCatalog;
use crate::domain::REFERENCE_DATE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("invalid reference date '{0}' (expected YYYY-MM-DD)")]
    InvalidReferenceDate(String),
}

/// Where the feed lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Site root the two paths are resolved against.
    pub base_url: String,
    pub primary_path: String,
    pub fallback_path: String,
    pub timeout_secs: u64,
    /// Explicit URL or local file; bypasses `base_url` when set.
    pub location: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".into(),
            primary_path: "/six-national-strategic/stock_data.json".into(),
            fallback_path: "/stock_data.json".into(),
            timeout_secs: 30,
            location: None,
        }
    }
}

impl FeedConfig {
    pub fn primary_url(&self) -> String {
        join_url(&self.base_url, &self.primary_path)
    }

    pub fn fallback_url(&self) -> String {
        join_url(&self.base_url, &self.fallback_path)
    }
}

/// Snapshot dates are compared as strings, so the reference date must be
/// zero-padded `YYYY-MM-DD`.
fn canonical_date(raw: &str) -> Result<String, ConfigError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidReferenceDate(raw.to_string()))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Baseline date for change figures and the chart marker.
    pub reference_date: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            reference_date: REFERENCE_DATE.into(),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tech6Config {
    pub feed: FeedConfig,
    pub dashboard: DashboardConfig,
    /// Optional sector catalog TOML replacing the built-in one.
    pub catalog: Option<PathBuf>,
}

impl Tech6Config {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.dashboard.reference_date = canonical_date(&config.dashboard.reference_date)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write the config, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)
    }

    /// Override the reference date. Stored zero-padded, e.g. `2025-1-5`
    /// becomes `2025-01-05`.
    pub fn set_reference_date(&mut self, date: &str) -> Result<(), ConfigError> {
        self.dashboard.reference_date = canonical_date(date)?;
        Ok(())
    }

    /// The configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<SectorCatalog, ConfigError> {
        match &self.catalog {
            Some(path) => SectorCatalog::from_file(path),
            None => Ok(SectorCatalog::default_jp()),
        }
    }

    /// Default config file location: `<config dir>/tech6/config.toml`.
    pub fn default_path(config_dir: Option<PathBuf>) -> PathBuf {
        config_dir
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tech6")
            .join("config.toml")
    }
}
