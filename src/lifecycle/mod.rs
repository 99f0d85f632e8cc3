//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config -> Validate -> bulk pass -> register watches
//!
//! Config change:
//!     watcher signal -> close previous watches -> bulk pass -> re-register
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c / SIGTERM -> loop exits, watches dropped
//! ```
//!
//! # Design Decisions
//! - Exactly one watch subscription is live at a time; the old one is
//!   closed before any work of the new cycle starts
//! - A failed bulk pass never prevents watches from being re-established

pub mod orchestrator;
pub mod shutdown;

pub use orchestrator::Orchestrator;
pub use shutdown::Shutdown;
