//! Background worker thread: feed loads run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! builds the dashboard off the main thread and sends it back whole.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{error, info};

use tech6_core::{Dashboard, FeedSource, SectorCatalog};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadFeed,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    FeedLoaded {
        dashboard: Box<Dashboard>,
    },
    FeedFailed {
        category: String,
        message: String,
        context: String,
    },
}

/// Everything the worker needs to turn a feed into a dashboard.
pub struct FeedJob {
    pub source: Box<dyn FeedSource>,
    pub catalog: SectorCatalog,
    pub reference_date: String,
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    job: FeedJob,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tech6-worker".into())
        .spawn(move || worker_loop(rx, tx, job))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, job: FeedJob) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::LoadFeed) => {
                let resp = load(&job);
                if tx.send(resp).is_err() {
                    break;
                }
            }
        }
    }
}

fn load(job: &FeedJob) -> WorkerResponse {
    match job.source.load() {
        Ok(feed) => {
            let dashboard = Dashboard::build(&feed, &job.catalog, &job.reference_date);
            info!(
                source = job.source.name(),
                history = dashboard.history.len(),
                "feed loaded"
            );
            WorkerResponse::FeedLoaded {
                dashboard: Box::new(dashboard),
            }
        }
        Err(e) => {
            error!(source = job.source.name(), error = %e, "failed to load stock data");
            WorkerResponse::FeedFailed {
                category: e.category().to_string(),
                message: e.to_string(),
                context: job.source.name().to_string(),
            }
        }
    }
}
