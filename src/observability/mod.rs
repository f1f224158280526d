//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//! Sync cycles produce:
//!     → Diagnostics, flushed through the same subscriber
//! ```

pub mod logging;
