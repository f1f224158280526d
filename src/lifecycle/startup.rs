//! Startup hook that publishes healthchecks once routing is complete.
//!
//! # Responsibilities
//! - Run exactly one sync cycle after the route table is built
//! - Report the outcome without aborting boot
//!
//! # Design Decisions
//! - Only an unresolvable route aborts startup; it is a programming error

use crate::error::ResolutionError;
use crate::routing::RouteResolver;
use crate::sync::{HealthcheckClient, SyncReport};

/// Publish everything queued during route registration.
pub async fn sync_on_startup(
    client: &HealthcheckClient,
    resolver: &dyn RouteResolver,
) -> Result<SyncReport, ResolutionError> {
    let report = client.put(resolver, Vec::new()).await?;

    tracing::info!(
        monitors = report.payload.len(),
        published = report.published,
        errors = report.has_errors(),
        "Healthcheck sync finished"
    );

    Ok(report)
}
