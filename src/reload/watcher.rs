//! Workflow file watcher with debounce.
//!
//! # Responsibilities
//! - Subscribe to filesystem notifications for the indexed workflow files
//! - Debounce raw events: a path fires only after a quiescence window with
//!   no further writes, so editor write bursts coalesce into one reload
//! - Hand each fired path to the dispatcher on its own task
//!
//! # Design Decisions
//! - Exactly one watcher is live at a time, owned by the orchestration
//!   loop; dropping the handle tears down the subscription and the
//!   debounce task, but never in-flight reloads

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::reload::dispatcher::ReloadDispatcher;

/// How long a file must stay quiet before its change event fires.
const QUIESCENCE_WINDOW: Duration = Duration::from_millis(500);

/// How often the debounce loop sweeps for quiet files.
const SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Ownership of the active workflow watch subscription.
pub struct WorkflowWatcher {
    _watcher: RecommendedWatcher,
    debounce: JoinHandle<()>,
}

impl WorkflowWatcher {
    /// Register watches for every path in the dispatcher's index and start
    /// the debounce loop.
    ///
    /// The caller is expected to skip registration entirely when the index
    /// is empty; this constructor assumes there is something to watch.
    pub fn spawn(dispatcher: Arc<ReloadDispatcher>) -> Result<Self, notify::Error> {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            let _ = raw_tx.send(path);
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Workflow watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for path in dispatcher.index().paths() {
            // A path that cannot be watched (e.g., the file is gone) is
            // skipped; the next cycle re-registers from scratch.
            if let Err(e) = watcher.watch(path, RecursiveMode::NonRecursive) {
                tracing::warn!(path = ?path, error = %e, "Failed to watch workflow file");
            } else {
                tracing::debug!(path = ?path, "Watching workflow file");
            }
        }

        tracing::info!(
            paths = dispatcher.index().paths().len(),
            "Workflow watcher started"
        );

        let debounce = tokio::spawn(debounce_loop(raw_rx, dispatcher));

        Ok(Self {
            _watcher: watcher,
            debounce,
        })
    }

    /// Tear down the subscription and the debounce loop.
    pub fn close(self) {
        tracing::info!("Closing workflow watcher");
        drop(self);
    }
}

impl Drop for WorkflowWatcher {
    fn drop(&mut self) {
        self.debounce.abort();
    }
}

/// Collect raw events and fire a path once it has been quiet for the
/// quiescence window. Distinct paths are dispatched on independent tasks.
async fn debounce_loop(
    mut raw_rx: mpsc::UnboundedReceiver<PathBuf>,
    dispatcher: Arc<ReloadDispatcher>,
) {
    let mut pending: HashMap<PathBuf, Instant> = HashMap::new();
    let mut ticker = time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            maybe_path = raw_rx.recv() => {
                match maybe_path {
                    Some(path) => {
                        pending.insert(path, Instant::now());
                    }
                    None => break,
                }
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let ready: Vec<PathBuf> = pending
                    .iter()
                    .filter(|(_, last)| now.duration_since(**last) >= QUIESCENCE_WINDOW)
                    .map(|(path, _)| path.clone())
                    .collect();

                for path in ready {
                    pending.remove(&path);
                    let dispatcher = Arc::clone(&dispatcher);
                    tokio::spawn(async move {
                        dispatcher.handle_change(&path).await;
                    });
                }
            }
        }
    }
}
