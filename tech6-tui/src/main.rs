//! Tech6 TUI: terminal dashboard for the JAPAN TECH 6 sectors.
//!
//! Panels:
//! 1. Sectors: Nikkei 225 badge and one card per sector
//! 2. Chart: normalized performance over the selected range
//! 3. Help: keyboard shortcuts
//!
//! Configuration comes from `<config dir>/tech6/config.toml`. Set
//! `TECH6_FEED` to point at another feed URL or local file.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tech6_core::data::open_source;
use tech6_core::Tech6Config;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{FeedJob, WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir();
    let state_path = config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tech6")
        .join("state.json");
    let config_path = Tech6Config::default_path(config_dir);
    let log_path = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tech6")
        .join("tech6-tui.log");

    init_logging(&log_path);

    // Configuration and feed source
    let mut config = Tech6Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Ok(feed) = std::env::var("TECH6_FEED") {
        config.feed.location = Some(feed);
    }
    let catalog = config.load_catalog().context("loading sector catalog")?;
    let source = open_source(&config.feed).context("opening feed source")?;
    let source_label = source.name().to_string();
    info!(source = %source_label, config = %config_path.display(), "starting");

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let job = FeedJob {
        source,
        catalog: catalog.clone(),
        reference_date: config.dashboard.reference_date.clone(),
    };
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx, job)
        .context("failed to spawn worker thread")?;

    // Build app state
    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        catalog,
        &config.dashboard.reference_date,
        source_label,
        state_path.clone(),
    );

    persistence::apply(&mut app, persistence::load(&state_path));

    // One load at startup; later loads only on request.
    app.request_reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&app.state_path, &persisted) {
        warn!(error = %e, "failed to save UI state");
    }

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Log to a file so the alternate screen stays clean. Logging is skipped
/// when the file cannot be opened.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = File::options().create(true).append(true).open(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::FeedLoaded { dashboard } => app.apply_dashboard(*dashboard),
        WorkerResponse::FeedFailed {
            category,
            message,
            context,
        } => app.load_failed(ErrorCategory::from_tag(&category), message, context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{app, sample_dashboard};

    #[test]
    fn worker_responses_update_state() {
        let (mut app, _cmd_rx, _resp_tx) = app();
        app.loading = true;
        let dash = sample_dashboard(&app.catalog);
        handle_worker_response(
            &mut app,
            WorkerResponse::FeedLoaded {
                dashboard: Box::new(dash.clone()),
            },
        );
        assert_eq!(app.dashboard, dash);

        handle_worker_response(
            &mut app,
            WorkerResponse::FeedFailed {
                category: "data".into(),
                message: "invalid JSON".into(),
                context: "http".into(),
            },
        );
        assert_eq!(app.dashboard, dash);
        assert_eq!(app.error_history[0].category, ErrorCategory::Data);
    }
}
