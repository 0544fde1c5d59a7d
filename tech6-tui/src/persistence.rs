//! UI preference persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tech6_core::TimeRange;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub active_panel: Panel,
    pub range: TimeRange,
    /// Key of the selected sector card.
    pub selected_sector: Option<String>,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Sectors,
            range: TimeRange::All,
            selected_sector: None,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "ignoring unreadable UI state");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_panel: app.active_panel,
        range: app.range,
        selected_sector: app.selected_card().map(|c| c.key.clone()),
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    app.range = state.range;
    if let Some(key) = &state.selected_sector {
        if let Some(idx) = app.dashboard.cards.iter().position(|c| &c.key == key) {
            app.cursor = idx;
        }
    }
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
