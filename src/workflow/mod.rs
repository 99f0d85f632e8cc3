//! Workflow definition loading.
//!
//! A workflow is a single JSON document on disk. Loading resolves the
//! configured path, reads the file and parses it; the parsed value is
//! never inspected here.

pub mod loader;

pub use loader::{load, WorkflowError};
