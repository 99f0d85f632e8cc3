//! Endpoint client subsystem.
//!
//! Outbound side of the orchestrator: the two remote operations every
//! endpoint supports, terminate and execute. Failures are recovered here
//! and reported as booleans so batch callers can keep going.

pub mod client;
pub mod types;

pub use client::EndpointClient;
pub use types::ExecuteRequest;
