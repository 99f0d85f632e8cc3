//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Gate per-call detail behind the verbosity flag
//!
//! # Design Decisions
//! - RUST_LOG always wins when set
//! - Verbose mode maps to debug for this crate; failures log at warn/error
//!   and are therefore emitted at any verbosity

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `verbose` comes from the CLI flag or the configuration file and selects
/// the default filter when the environment does not set one.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "workflow_orchestrator=debug"
    } else {
        "workflow_orchestrator=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
