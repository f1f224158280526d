//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load settings → Register routes (healthchecks queued)
//!     → finish() route table → sync_on_startup → Start listener
//! ```
//!
//! # Design Decisions
//! - Sync runs after routing is complete so route names are resolvable
//! - A failed publish is logged, the server still starts

pub mod startup;

pub use startup::sync_on_startup;
