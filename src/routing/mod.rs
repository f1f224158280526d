//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     HealthcheckRouter::route / nest
//!     → axum Router (request dispatch, unchanged)
//!     → table.rs (name → pattern)
//!     → HealthcheckClient::enqueue (attached healthchecks)
//!
//! After finish():
//!     RouteTable implements RouteResolver
//!     → healthchecks reverse their route names into paths
//! ```
//!
//! # Design Decisions
//! - Reverse lookup is a trait so declarations never depend on the table type
//! - Deterministic: same name and parameters always give the same path
//! - Tables are immutable once `finish()` hands them out

pub mod router;
pub mod table;

pub use router::{HealthcheckRouter, RouteOptions};
pub use table::{NoReverseMatch, RouteParams, RoutePattern, RouteResolver, RouteTable};
