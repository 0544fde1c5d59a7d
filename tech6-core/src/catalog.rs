//! Sector catalog: the six national-strategy sectors, their constituents,
//! and the ticker → company name table.
//!
//! The catalog can be stored as a TOML file so the basket composition and
//! display names can change without a rebuild. The built-in default is the
//! JAPAN TECH 6 lineup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ConfigError;

/// A curated sector basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorDef {
    /// Key used by the feed (`sectors.<key>` and history columns).
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tickers: Vec<String>,
}

/// The complete catalog. Sector order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCatalog {
    pub sectors: Vec<SectorDef>,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl SectorCatalog {
    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(format!("catalog: {e}")))
    }

    /// Serialize the catalog to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn sector(&self, key: &str) -> Option<&SectorDef> {
        self.sectors.iter().find(|s| s.key == key)
    }

    pub fn sector_keys(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.key.as_str()).collect()
    }

    /// Company name for a ticker, or the ticker itself when unmapped.
    pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
        self.names.get(ticker).map(|s| s.as_str()).unwrap_or(ticker)
    }

    /// Yahoo! Finance Japan quote page for a ticker.
    pub fn quote_url(ticker: &str) -> String {
        format!("https://finance.yahoo.co.jp/quote/{ticker}")
    }

    /// The built-in JAPAN TECH 6 catalog.
    pub fn default_jp() -> Self {
        fn sector(key: &str, name: &str, icon: &str, tickers: &[&str]) -> SectorDef {
            SectorDef {
                key: key.into(),
                name: name.into(),
                icon: icon.into(),
                tickers: tickers.iter().map(|t| t.to_string()).collect(),
            }
        }

        let sectors = vec![
            sector(
                "AI_Robot",
                "AI・ロボット",
                "🤖",
                &[
                    "9984.T", "6861.T", "6954.T", "6273.T", "6645.T", "3993.T", "4180.T",
                    "247A.T", "4382.T", "4011.T",
                ],
            ),
            sector(
                "Quantum",
                "量子技術",
                "⚛️",
                &[
                    "6702.T", "6701.T", "9432.T", "6501.T", "6503.T", "3687.T", "6597.T",
                    "6521.T", "7713.T", "2693.T",
                ],
            ),
            sector(
                "Semi",
                "半導体",
                "💎",
                &[
                    "8035.T", "6857.T", "4063.T", "6146.T", "6920.T", "6323.T", "6315.T",
                    "4369.T", "6871.T", "6266.T",
                ],
            ),
            sector(
                "Bio",
                "バイオ",
                "🧬",
                &[
                    "4519.T", "4568.T", "4502.T", "4578.T", "4503.T", "4587.T", "2160.T",
                    "4552.T", "4592.T", "4599.T",
                ],
            ),
            sector(
                "Fusion",
                "核融合",
                "☀️",
                &[
                    "7013.T", "5802.T", "5803.T", "5801.T", "1963.T", "5310.T", "7711.T",
                    "3446.T", "6378.T", "6864.T",
                ],
            ),
            sector(
                "Space",
                "宇宙",
                "🚀",
                &[
                    "7011.T", "7012.T", "9412.T", "7751.T", "9433.T", "9348.T", "5595.T",
                    "186A.T", "290A.T", "402A.T",
                ],
            ),
        ];

        let names = [
            ("9984.T", "ソフトバンクG"),
            ("6861.T", "キーエンス"),
            ("6954.T", "ファナック"),
            ("6273.T", "SMC"),
            ("6645.T", "オムロン"),
            ("3993.T", "PKSHA"),
            ("4180.T", "Appier"),
            ("247A.T", "Aiロボティクス"),
            ("4382.T", "HEROZ"),
            ("4011.T", "ヘッドウォータース"),
            ("6702.T", "富士通"),
            ("6701.T", "NEC"),
            ("9432.T", "NTT"),
            ("6501.T", "日立製作所"),
            ("6503.T", "三菱電機"),
            ("3687.T", "フィックスターズ"),
            ("6597.T", "HPCシステムズ"),
            ("6521.T", "オキサイド"),
            ("7713.T", "シグマ光機"),
            ("2693.T", "YKT"),
            ("8035.T", "東京エレクトロン"),
            ("6857.T", "アドバンテスト"),
            ("4063.T", "信越化学"),
            ("6146.T", "ディスコ"),
            ("6920.T", "レーザーテック"),
            ("6323.T", "ローツェ"),
            ("6315.T", "TOWA"),
            ("4369.T", "トリケミカル"),
            ("6871.T", "日本マイクロニクス"),
            ("6266.T", "タツモ"),
            ("4519.T", "中外製薬"),
            ("4568.T", "第一三共"),
            ("4502.T", "武田薬品"),
            ("4578.T", "大塚HD"),
            ("4503.T", "アステラス製薬"),
            ("4587.T", "ペプチドリーム"),
            ("2160.T", "GNIグループ"),
            ("4552.T", "JCRファーマ"),
            ("4592.T", "サンバイオ"),
            ("4599.T", "ステムリム"),
            ("7013.T", "IHI"),
            ("5802.T", "住友電気工業"),
            ("5803.T", "フジクラ"),
            ("5801.T", "古河電気工業"),
            ("1963.T", "日揮HD"),
            ("5310.T", "東洋炭素"),
            ("7711.T", "助川電気工業"),
            ("3446.T", "ジェイテック"),
            ("6378.T", "木村化工機"),
            ("6864.T", "エヌエフHD"),
            ("7011.T", "三菱重工業"),
            ("7012.T", "川崎重工業"),
            ("9412.T", "スカパーJSAT"),
            ("7751.T", "キヤノン"),
            ("9433.T", "KDDI"),
            ("9348.T", "ispace"),
            ("464A.T", "QPSホールディングス"),
            ("186A.T", "アストロスケール"),
            ("290A.T", "Synspective"),
            ("402A.T", "アクセルスペース"),
        ]
        .into_iter()
        .map(|(t, n)| (t.to_string(), n.to_string()))
        .collect();

        Self { sectors, names }
    }
}

impl Default for SectorCatalog {
    fn default() -> Self {
        Self::default_jp()
    }
}
