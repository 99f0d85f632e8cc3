//! Reload subsystem: file-watch-to-reload dispatch.
//!
//! # Data Flow
//! ```text
//! configuration snapshot
//!     -> index.rs (workflow path -> ordered endpoint urls)
//!     -> watcher.rs (notify subscription + debounce)
//!     -> on quiet file -> dispatcher.rs
//!     -> per affected endpoint: terminate, reload all workflows, execute
//! ```
//!
//! # Design Decisions
//! - Index and watcher live exactly one orchestration cycle; a new cycle
//!   rebuilds both from scratch
//! - Stale events (path no longer indexed) are no-ops

pub mod dispatcher;
pub mod index;
pub mod watcher;

pub use dispatcher::{start_endpoint, ReloadDispatcher, ReloadError};
pub use index::ReloadIndex;
pub use watcher::WorkflowWatcher;
