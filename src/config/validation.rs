//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint urls are unique (the reload index keys on them)
//! - Validate value ranges (ports non-zero, paths non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: OrchestratorConfig -> Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::OrchestratorConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An endpoint entry has an empty url.
    #[error("endpoint {index} has an empty url")]
    EmptyUrl { index: usize },

    /// An endpoint url is not a valid authority.
    #[error("endpoint url '{url}' is not a valid host:port authority")]
    InvalidUrl { url: String },

    /// The same url appears more than once in the snapshot.
    #[error("endpoint url '{url}' is configured more than once")]
    DuplicateUrl { url: String },

    /// A workflow entry has an empty path.
    #[error("endpoint '{url}' has a workflow with an empty path")]
    EmptyWorkflowPath { url: String },

    /// A workflow entry has port 0.
    #[error("endpoint '{url}' workflow '{workflow}' has port 0")]
    ZeroPort { url: String, workflow: String },
}

/// Validate a configuration snapshot, collecting every error.
pub fn validate_config(config: &OrchestratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.url.is_empty() {
            errors.push(ValidationError::EmptyUrl { index });
            continue;
        }

        // The client prefixes the scheme itself; the configured value must
        // be a bare host:port authority.
        if url::Url::parse(&format!("http://{}", endpoint.url)).is_err() {
            errors.push(ValidationError::InvalidUrl {
                url: endpoint.url.clone(),
            });
        }

        if !seen.insert(endpoint.url.as_str()) {
            errors.push(ValidationError::DuplicateUrl {
                url: endpoint.url.clone(),
            });
        }

        for workflow in &endpoint.workflows {
            if workflow.workflow.as_os_str().is_empty() {
                errors.push(ValidationError::EmptyWorkflowPath {
                    url: endpoint.url.clone(),
                });
            }
            if workflow.port == 0 {
                errors.push(ValidationError::ZeroPort {
                    url: endpoint.url.clone(),
                    workflow: workflow.workflow.display().to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
