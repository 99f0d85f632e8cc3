//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! orchestrator. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Emit detailed per-call tracing when true.
    pub verbose: bool,

    /// Endpoint definitions to orchestrate.
    pub endpoints: Vec<EndpointConfig>,
}

/// A remote endpoint and the workflows it should serve.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Endpoint authority (e.g., "127.0.0.1:3000"). Unique within a
    /// configuration snapshot; the reload index keys on it.
    pub url: String,

    /// Workflows this endpoint serves, in configuration order.
    #[serde(default)]
    pub workflows: Vec<WorkflowConfig>,
}

/// A single workflow assignment for an endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Path to the workflow definition file (JSON).
    pub workflow: PathBuf,

    /// Port the endpoint should serve this workflow on.
    pub port: u16,
}
