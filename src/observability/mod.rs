//! Observability subsystem.
//!
//! Line-oriented tracing output to stdout; no metrics, no status API.

pub mod logging;
