//! Reload index construction.
//!
//! # Responsibilities
//! - Map each watched workflow file to the endpoints that depend on it
//! - Preserve configuration order for both paths and endpoint urls
//!
//! # Design Decisions
//! - Rebuilt wholesale on every orchestration cycle, never patched
//! - Duplicate urls for a path are kept as configured; the configuration
//!   validator already guarantees endpoint urls are unique
//! - Keys are canonicalized when the file exists so watcher events and
//!   configured paths agree on one spelling

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::EndpointConfig;

/// Mapping from workflow file path to the ordered endpoint urls bound to it.
#[derive(Debug, Clone, Default)]
pub struct ReloadIndex {
    entries: HashMap<PathBuf, Vec<String>>,
    /// Distinct keys in first-seen configuration order.
    paths: Vec<PathBuf>,
}

impl ReloadIndex {
    /// Build the index from a configuration snapshot.
    pub fn build(endpoints: &[EndpointConfig]) -> Self {
        let mut index = Self::default();

        for endpoint in endpoints {
            for workflow in &endpoint.workflows {
                let key = normalize(&workflow.workflow);
                if !index.entries.contains_key(&key) {
                    index.paths.push(key.clone());
                }
                index
                    .entries
                    .entry(key)
                    .or_default()
                    .push(endpoint.url.clone());
            }
        }

        index
    }

    /// Endpoint urls bound to a path, in recorded order.
    pub fn lookup(&self, path: &Path) -> Option<&[String]> {
        self.entries.get(&normalize(path)).map(Vec::as_slice)
    }

    /// Distinct watched paths in first-seen order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Canonicalize a path when possible so the configured spelling and the
/// watcher's event spelling hash to the same key. Falls back to the raw
/// path for files that do not exist yet.
fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
