//! Healthcheck declaration subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration:
//!     Healthcheck (raw inputs, route name unresolvable yet)
//!
//! Sync time (declaration.rs):
//!     resolve()
//!     → RouteResolver::reverse (path)
//!     → url.rs (scheme + hostname discovery + query)
//!     → identity.rs (default name, identity code)
//!     → ResolvedHealthcheck
//!     → serialize() → MonitorPayload
//! ```
//!
//! # Design Decisions
//! - Unresolved and resolved declarations are separate types
//! - Identity depends on method, display URL and environment only
//! - Field validation happens at serialization, so one bad declaration
//!   cannot stop the batch

pub mod declaration;
pub mod identity;
pub mod url;

pub use declaration::{Healthcheck, HttpMethod, MonitorPayload, RequestPayload, ResolvedHealthcheck};
pub use self::url::HealthcheckUrl;
