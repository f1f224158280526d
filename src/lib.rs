//! Route-level healthcheck declarations, synced to a monitoring API.
//!
//! Healthchecks are attached to axum routes while the router is built, resolved
//! into concrete URLs once the route table is complete, and published in one
//! idempotent batch PUT.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod sync;

pub use config::Settings;
pub use error::{ConfigurationError, HealthcheckError, ResolutionError, TransportError, ValidationError};
pub use health::{Healthcheck, ResolvedHealthcheck};
pub use routing::{HealthcheckRouter, RouteOptions, RouteResolver, RouteTable};
pub use sync::{HealthcheckClient, SyncReport};

/// Batch entry point: merge `healthchecks` with anything already queued and
/// run one sync cycle.
pub async fn sync_batch(
    client: &HealthcheckClient,
    resolver: &dyn RouteResolver,
    healthchecks: Vec<Healthcheck>,
) -> Result<SyncReport, ResolutionError> {
    client.put(resolver, healthchecks).await
}
