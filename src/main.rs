//! Workflow Endpoint Orchestrator
//!
//! Drives a fleet of workflow-serving endpoints from one configuration
//! file: terminate whatever runs, push each configured workflow document,
//! then watch the workflow files and restart the affected endpoints on
//! edits.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file (TOML) ──▶ config loader/validator ──▶ orchestration cycle
//!        │                                                   │
//!        │ (own-file watch)                   ┌───────────────┴───────────────┐
//!        └──▶ restart cycle                   ▼                               ▼
//!                                   endpoint client ◀── workflow loader   reload index
//!                                   (terminate/execute                        │
//!                                    over HTTP)                               ▼
//!                                          ▲                       workflow file watcher
//!                                          └────── on debounced change ───────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use workflow_orchestrator::config::{load_config, ConfigWatcher};
use workflow_orchestrator::endpoint::EndpointClient;
use workflow_orchestrator::lifecycle::{Orchestrator, Shutdown};
use workflow_orchestrator::observability::logging;

#[derive(Parser)]
#[command(name = "orchestrator")]
#[command(about = "Workflow endpoint orchestrator", long_about = None)]
struct Cli {
    /// Path to the orchestrator configuration file.
    #[arg(short, long, default_value = "orchestrator.toml")]
    config: PathBuf,

    /// Emit detailed per-call tracing (overrides the config file flag).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Startup failures are fatal; everything after the orchestrator starts
    // is recovered and logged instead.
    let config = load_config(&cli.config).map_err(|e| {
        eprintln!(
            "Failed to load configuration {}: {}",
            cli.config.display(),
            e
        );
        e
    })?;

    logging::init(cli.verbose || config.verbose);

    tracing::info!(
        config = %cli.config.display(),
        endpoints = config.endpoints.len(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.install_signal_handler();

    let (config_watcher, config_updates) = ConfigWatcher::new(&cli.config);
    let _config_watch = config_watcher.run()?;

    let orchestrator = Orchestrator::new(EndpointClient::new());
    orchestrator
        .run(config, config_updates, shutdown.subscribe())
        .await;

    tracing::info!("Shutdown complete");
    Ok(())
}
