//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! the dashboard value it sends back replaces ours wholesale.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tech6_core::{Dashboard, SectorCard, SectorCatalog, TimeRange};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Sector cards per grid row.
pub const GRID_COLS: usize = 3;

const MAX_ERRORS: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Sectors,
    Chart,
    Help,
}

impl Panel {
    const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Sectors => 0,
            Panel::Chart => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Sectors),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Sectors => "Sectors",
            Panel::Chart => "Chart",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Sectors)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Sectors)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Io => "IO",
            ErrorCategory::Other => "ERR",
        }
    }

    /// Map a `FeedError::category()` tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "network" => ErrorCategory::Network,
            "data" => ErrorCategory::Data,
            "io" => ErrorCategory::Io,
            _ => ErrorCategory::Other,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    /// Holdings of the card at this index.
    Holdings(usize),
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Dashboard
    pub catalog: SectorCatalog,
    pub dashboard: Dashboard,
    pub range: TimeRange,
    pub cursor: usize,
    pub holdings_scroll: usize,
    pub loading: bool,
    pub source_label: String,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        catalog: SectorCatalog,
        reference_date: &str,
        source_label: String,
        state_path: PathBuf,
    ) -> Self {
        let dashboard = Dashboard::empty(&catalog, reference_date);
        Self {
            active_panel: Panel::Sectors,
            running: true,
            catalog,
            dashboard,
            range: TimeRange::default(),
            cursor: 0,
            holdings_scroll: 0,
            loading: false,
            source_label,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            error_scroll: 0,
            overlay: Overlay::None,
            state_path,
        }
    }

    /// Ask the worker for a fresh feed. Ignored while a load is in flight.
    pub fn request_reload(&mut self) {
        if self.loading {
            return;
        }
        match self.worker_tx.send(WorkerCommand::LoadFeed) {
            Ok(()) => {
                self.loading = true;
                self.set_status(format!("Loading {}...", self.source_label));
            }
            Err(_) => self.push_error(
                ErrorCategory::Other,
                "Worker is not running".into(),
                self.source_label.clone(),
            ),
        }
    }

    /// Replace the dashboard with a freshly built one.
    pub fn apply_dashboard(&mut self, dashboard: Dashboard) {
        self.loading = false;
        self.dashboard = dashboard;
        if self.cursor >= self.dashboard.cards.len() {
            self.cursor = self.dashboard.cards.len().saturating_sub(1);
        }
        if let Overlay::Holdings(idx) = self.overlay {
            if idx >= self.dashboard.cards.len() {
                self.overlay = Overlay::None;
            }
        }
        info!(rows = self.dashboard.history.len(), "dashboard updated");
        if self.dashboard.history.is_empty() {
            self.set_warning("Feed has no history; changes read 0.00%");
            return;
        }
        let stamp = self.dashboard.last_updated_display();
        if stamp.is_empty() {
            self.set_status("Data loaded");
        } else {
            self.set_status(format!("Data loaded (updated {stamp})"));
        }
    }

    /// A load failed: record it and keep showing the previous dashboard.
    pub fn load_failed(&mut self, category: ErrorCategory, message: String, context: String) {
        self.loading = false;
        warn!(%message, %context, "keeping previous dashboard");
        self.push_error(category, message, context);
    }

    pub fn selected_card(&self) -> Option<&SectorCard> {
        self.dashboard.cards.get(self.cursor)
    }

    /// Move the grid cursor by whole cells, staying on existing cards.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.dashboard.cards.len();
        if len == 0 {
            return;
        }
        let col = (self.cursor % GRID_COLS) as isize + dx;
        let row = (self.cursor / GRID_COLS) as isize + dy;
        if col < 0 || col >= GRID_COLS as isize || row < 0 {
            return;
        }
        let target = row as usize * GRID_COLS + col as usize;
        if target < len {
            self.cursor = target;
        }
    }

    pub fn cycle_range(&mut self) {
        self.range = self.range.next();
        self.set_status(format!("Range: {}", self.range));
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERRORS {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
