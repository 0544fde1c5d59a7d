//! Keyboard input dispatch: overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Holdings(idx) => {
            let idx = *idx;
            handle_holdings_overlay(app, key, idx);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Sectors; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('r') => {
            app.cycle_range();
            return;
        }
        KeyCode::Char('R') => {
            app.request_reload();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Sectors => handle_sectors_key(app, key),
        Panel::Chart | Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_holdings_overlay(app: &mut AppState, key: KeyEvent, idx: usize) {
    let count = app.dashboard.cards.get(idx).map_or(0, |c| c.holdings.len());
    let last = app.dashboard.cards.len().saturating_sub(1);

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.holdings_scroll + 1 < count {
                app.holdings_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.holdings_scroll = app.holdings_scroll.saturating_sub(1);
        }
        // Step to the neighbouring sector without closing the overlay.
        KeyCode::Char('l') | KeyCode::Right if idx < last => open_holdings(app, idx + 1),
        KeyCode::Char('h') | KeyCode::Left if idx > 0 => open_holdings(app, idx - 1),
        _ => {}
    }
}

fn handle_sectors_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1, 0),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(0, -1),
        KeyCode::Enter => {
            if app.selected_card().is_some() {
                open_holdings(app, app.cursor);
            }
        }
        _ => {}
    }
}

fn open_holdings(app: &mut AppState, idx: usize) {
    app.cursor = idx;
    app.holdings_scroll = 0;
    app.overlay = Overlay::Holdings(idx);
}
