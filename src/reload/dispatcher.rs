//! Reload dispatch: terminate-then-execute cycles for affected endpoints.
//!
//! # Responsibilities
//! - Resolve a changed file to the endpoints bound to it
//! - Restart each affected endpoint: terminate, then re-execute ALL of its
//!   workflows from whatever is currently on disk
//! - Keep one endpoint's failure from stopping its siblings
//!
//! # Design Decisions
//! - A file change restarts the whole endpoint rather than updating one
//!   workflow; the serve operation has no update semantics, and a full
//!   restart also self-heals workflows that failed to load in an earlier
//!   cycle
//! - Affected endpoints are processed sequentially to bound downstream
//!   load; a single endpoint's executes run concurrently

use std::path::Path;

use futures_util::future::join_all;
use thiserror::Error;

use crate::config::EndpointConfig;
use crate::endpoint::EndpointClient;
use crate::reload::index::ReloadIndex;
use crate::workflow;

/// Error type for reload requests.
#[derive(Debug, Error)]
pub enum ReloadError {
    /// The requested url is not part of the current configuration snapshot.
    #[error("endpoint '{url}' is not configured")]
    UnknownEndpoint { url: String },
}

/// Handles file-change events against one configuration snapshot.
///
/// Holds the snapshot's endpoint list and the derived [`ReloadIndex`];
/// both are replaced wholesale when the orchestrator starts a new cycle.
#[derive(Debug)]
pub struct ReloadDispatcher {
    client: EndpointClient,
    endpoints: Vec<EndpointConfig>,
    index: ReloadIndex,
}

impl ReloadDispatcher {
    /// Build a dispatcher (and its index) for a configuration snapshot.
    pub fn new(client: EndpointClient, endpoints: Vec<EndpointConfig>) -> Self {
        let index = ReloadIndex::build(&endpoints);
        Self {
            client,
            endpoints,
            index,
        }
    }

    pub fn index(&self) -> &ReloadIndex {
        &self.index
    }

    /// Handle a debounced change event for one file.
    ///
    /// A path with no index entry is a stale event from a previous
    /// configuration and is ignored.
    pub async fn handle_change(&self, path: &Path) {
        let Some(urls) = self.index.lookup(path) else {
            tracing::debug!(path = ?path, "Change event for unwatched path, ignoring");
            return;
        };

        tracing::info!(path = ?path, endpoints = urls.len(), "Workflow file changed, reloading");

        for url in urls {
            if let Err(e) = self.reload_endpoint(url).await {
                // Per-endpoint boundary: log and keep going with the rest.
                tracing::error!(url = %url, error = %e, "Reload failed for endpoint");
            }
        }
    }

    /// Restart a single endpoint by url: terminate, then re-execute every
    /// workflow currently configured for it.
    ///
    /// This is also the manual reload entry point; an unknown url aborts
    /// this request only.
    pub async fn reload_endpoint(&self, url: &str) -> Result<(), ReloadError> {
        let endpoint = self
            .endpoints
            .iter()
            .find(|endpoint| endpoint.url == url)
            .ok_or_else(|| ReloadError::UnknownEndpoint {
                url: url.to_string(),
            })?;

        // The terminate result is logged by the client; a failed terminate
        // must not suppress the execute attempts.
        self.client.terminate(url).await;
        start_endpoint(&self.client, endpoint).await;

        Ok(())
    }
}

/// Load every workflow configured for an endpoint and execute the ones
/// that loaded, concurrently, waiting for all to settle.
///
/// Used by both the bulk startup pass and the reload path so the two share
/// one execute policy. A workflow that fails to load is logged and
/// skipped; its siblings still run.
pub async fn start_endpoint(client: &EndpointClient, endpoint: &EndpointConfig) {
    let mut executes = Vec::new();

    for config in &endpoint.workflows {
        match workflow::load(&config.workflow).await {
            Ok(document) => executes.push((config.port, document)),
            Err(e) => {
                tracing::error!(url = %endpoint.url, error = %e, "Skipping workflow");
            }
        }
    }

    let results = join_all(
        executes
            .iter()
            .map(|(port, document)| client.execute(&endpoint.url, *port, document)),
    )
    .await;

    let failed = results.iter().filter(|ok| !**ok).count();
    if failed > 0 {
        tracing::warn!(
            url = %endpoint.url,
            failed,
            total = results.len(),
            "Some executes failed for endpoint"
        );
    } else {
        tracing::debug!(
            url = %endpoint.url,
            workflows = results.len(),
            "Endpoint started"
        );
    }
}
