//! Healthcheck sync subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration:
//!     HealthcheckRouter::route → client.rs enqueue
//!
//! Startup hook / batch API:
//!     client.rs put
//!     → drain (resolve + dedupe by identity code)
//!     → serialize (invalid declarations dropped)
//!     → transport.rs (single PUT, basic auth, timeout)
//!     → diagnostics.rs (flush to tracing)
//! ```
//!
//! # Design Decisions
//! - One attempt per cycle, no retries
//! - Sequential: one batch, one request
//! - The client is an explicit object owned by the application bootstrap

pub mod client;
pub mod diagnostics;
pub mod transport;

pub use client::{HealthcheckClient, SyncReport};
pub use diagnostics::{Diagnostic, Severity};
pub use transport::MonitorApi;
