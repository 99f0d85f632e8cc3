//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     -> loader.rs (parse & deserialize)
//!     -> validation.rs (semantic checks)
//!     -> OrchestratorConfig (validated, immutable)
//!     -> one snapshot per orchestration cycle
//!
//! On reload signal:
//!     watcher.rs detects change
//!     -> loader.rs loads new config
//!     -> validation.rs validates
//!     -> snapshot sent to the orchestration loop
//!     -> next cycle runs against the new snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full cycle restart
//! - All root fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::EndpointConfig;
pub use schema::OrchestratorConfig;
pub use schema::WorkflowConfig;
pub use watcher::ConfigWatcher;
