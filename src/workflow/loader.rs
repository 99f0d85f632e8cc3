//! Workflow definition loading from disk.

use std::path::{Path, PathBuf};
use thiserror::Error;

use serde_json::Value;

/// Error type for workflow loading.
///
/// Keeps "file unreadable" and "file unparseable" distinguishable even
/// though callers currently treat both as "skip this workflow".
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read workflow '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse workflow '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load a workflow definition file and parse it as JSON.
///
/// The document's shape is opaque; it is forwarded to the endpoint
/// unchanged.
pub async fn load(path: &Path) -> Result<Value, WorkflowError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WorkflowError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| WorkflowError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
