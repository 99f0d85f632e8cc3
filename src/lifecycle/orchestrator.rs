//! The orchestration cycle: Idle -> Running -> Watching.
//!
//! # Responsibilities
//! - On startup and on every configuration change: tear down the previous
//!   watch subscription, terminate all endpoints, execute all configured
//!   workflows, re-establish watches
//! - Keep the process alive across any mid-cycle failure; only startup may
//!   be fatal, and that happens before this loop is entered

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::{broadcast, mpsc};

use crate::config::OrchestratorConfig;
use crate::endpoint::EndpointClient;
use crate::reload::{start_endpoint, ReloadDispatcher, WorkflowWatcher};

/// Top-level orchestration driver.
pub struct Orchestrator {
    client: EndpointClient,
}

impl Orchestrator {
    pub fn new(client: EndpointClient) -> Self {
        Self { client }
    }

    /// Run orchestration cycles until shutdown.
    ///
    /// `config_updates` delivers fresh configuration snapshots from the
    /// config watcher; each one restarts the cycle from the top. In-flight
    /// terminate/execute calls from a previous cycle are never cancelled;
    /// only the watch subscription is guaranteed torn down first.
    pub async fn run(
        &self,
        initial: OrchestratorConfig,
        mut config_updates: mpsc::UnboundedReceiver<OrchestratorConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut config = initial;
        let mut watch: Option<WorkflowWatcher> = None;

        loop {
            // Idle -> Running: at most one watch subscription may be live,
            // so the previous one closes before the new cycle does anything.
            if let Some(previous) = watch.take() {
                previous.close();
            }

            watch = self.run_cycle(&config).await;

            tokio::select! {
                maybe_config = config_updates.recv() => {
                    match maybe_config {
                        Some(new_config) => config = new_config,
                        None => {
                            tracing::warn!("Configuration channel closed, stopping");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!("Orchestrator stopped");
    }

    /// One full pass: terminate all, execute all, register watches.
    ///
    /// Never fails; every error inside the pass is logged and the cycle
    /// still proceeds to watch registration.
    async fn run_cycle(&self, config: &OrchestratorConfig) -> Option<WorkflowWatcher> {
        tracing::info!(endpoints = config.endpoints.len(), "Starting orchestration cycle");

        // Running, step one: terminate every endpoint. The calls race each
        // other and the cycle waits for all to settle.
        let results = join_all(
            config
                .endpoints
                .iter()
                .map(|endpoint| self.client.terminate(&endpoint.url)),
        )
        .await;

        let failed = results.iter().filter(|ok| !**ok).count();
        if failed > 0 {
            tracing::warn!(failed, total = results.len(), "Some terminates failed");
        }

        // Running, step two: start each endpoint in configuration order.
        // One endpoint's workflow executes run concurrently; endpoints are
        // sequential, the same policy the reload path uses.
        for endpoint in &config.endpoints {
            start_endpoint(&self.client, endpoint).await;
        }

        // Running -> Watching: fresh index, fresh subscription.
        let dispatcher = Arc::new(ReloadDispatcher::new(
            self.client.clone(),
            config.endpoints.clone(),
        ));

        if dispatcher.index().is_empty() {
            tracing::info!("No workflow files configured, nothing to watch");
            return None;
        }

        match WorkflowWatcher::spawn(dispatcher) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::error!(error = %e, "Failed to register workflow watches");
                None
            }
        }
    }
}
