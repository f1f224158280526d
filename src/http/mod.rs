//! Demo host application subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs build_routes
//!     → HealthcheckRouter (routes + healthchecks)
//!     → finish() → axum Router + RouteTable
//!     → sync_on_startup
//!     → axum::serve
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppServer, ServerError};
