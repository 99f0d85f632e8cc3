//! Workflow Endpoint Orchestrator Library

pub mod config;
pub mod endpoint;
pub mod lifecycle;
pub mod observability;
pub mod reload;
pub mod workflow;

pub use config::OrchestratorConfig;
pub use endpoint::EndpointClient;
pub use lifecycle::{Orchestrator, Shutdown};
pub use reload::{ReloadDispatcher, ReloadIndex};
