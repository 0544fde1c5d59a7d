//! Test helpers for building app state and sample feeds.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tech6_core::{Dashboard, FeedDocument, SectorCatalog, REFERENCE_DATE};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

pub const SAMPLE_FEED: &str = r#"{
    "sectors": {
        "AI_Robot": { "change_percent": 1.2, "tickers": [
            { "ticker": "6954.T", "change": 2.1, "price": 3150.5 },
            "6506.T"
        ] },
        "Semi": { "change_percent": -0.8, "tickers": [
            { "ticker": "8035.T", "change": -1.5, "price": 38500 }
        ] }
    },
    "history": [
        { "date": "2025-11-20", "Nikkei225": 0.0, "AI_Robot": 0.0, "Semi": 0.0 },
        { "date": "2025-11-26", "Nikkei225": 2.0, "AI_Robot": 10.0, "Semi": 5.0 },
        { "date": "2025-12-05", "Nikkei225": 5.06, "AI_Robot": 21.0, "Semi": 0.0 }
    ],
    "last_updated": "2025-12-05 15:45:12",
    "nikkei_current_price": 50491.87
}"#;

pub fn sample_feed() -> FeedDocument {
    FeedDocument::from_json(SAMPLE_FEED).unwrap()
}

pub fn sample_dashboard(catalog: &SectorCatalog) -> Dashboard {
    Dashboard::build(&sample_feed(), catalog, REFERENCE_DATE)
}

/// App state wired to channels the test holds the other ends of.
pub fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(
        cmd_tx,
        resp_rx,
        SectorCatalog::default_jp(),
        REFERENCE_DATE,
        "test feed".into(),
        PathBuf::from("state.json"),
    );
    (app, cmd_rx, resp_tx)
}
