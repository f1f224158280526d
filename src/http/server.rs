//! Demo host application.
//!
//! # Responsibilities
//! - Register application routes, some with healthchecks
//! - Publish healthchecks once the route table is complete
//! - Serve with request tracing and graceful shutdown

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::{ConfigurationError, ResolutionError};
use crate::health::Healthcheck;
use crate::http::handlers;
use crate::lifecycle::sync_on_startup;
use crate::routing::{HealthcheckRouter, RouteOptions, RouteTable};
use crate::sync::HealthcheckClient;

/// Errors that stop the demo server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the demo application.
pub struct AppServer {
    router: Router,
    routes: RouteTable,
    client: Arc<HealthcheckClient>,
}

impl AppServer {
    /// Build the application routes, queueing their healthchecks on `client`.
    pub fn new(client: Arc<HealthcheckClient>) -> Result<Self, ConfigurationError> {
        let (router, routes) = build_routes(client.clone())?;
        Ok(Self {
            router: router.layer(TraceLayer::new_for_http()),
            routes,
            client,
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Publish healthchecks, then serve until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        sync_on_startup(&self.client, &self.routes).await?;

        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Route table of the demo application.
pub fn build_routes(
    client: Arc<HealthcheckClient>,
) -> Result<(Router, RouteTable), ConfigurationError> {
    let internal = HealthcheckRouter::new(client.clone()).route(
        "/status",
        get(handlers::status),
        RouteOptions::named("status").healthcheck(
            Healthcheck::new()
                .header("Accept", "application/json")
                .assertion(json!({
                    "rule_type": "response_body",
                    "operator": "contains",
                    "value": "operational",
                })),
        ),
    );

    let router = HealthcheckRouter::new(client)
        // No healthcheck param, no healthcheck.
        .route("/tos", get(handlers::terms_of_service), RouteOptions::named("tos"))
        .route(
            "/",
            get(handlers::index),
            RouteOptions::named("index").healthcheck(Healthcheck::new()),
        )
        .route(
            "/search/{query}",
            get(handlers::search),
            RouteOptions::named("search").healthcheck(Healthcheck::new().kwarg("query", "Acme")),
        )
        .route(
            "/api/leads/{lead}",
            put(handlers::update_lead),
            RouteOptions::named("leads-detail").healthcheck(
                Healthcheck::new()
                    .kwarg("lead", "12345")
                    .name("Lead API Update")
                    .method("PUT")
                    .body(r#"{"name": "Spacely Sprockets", "contact": "Cosmo Spacely"}"#)
                    .assertion(json!({
                        "rule_type": "response_body",
                        "operator": "contains",
                        "value": "Cosmo",
                    }))
                    .tag("api")
                    .interval_seconds(60)
                    .timeout_seconds(5),
            ),
        )
        .nest("/internal", internal, RouteOptions::named("internal"))?;

    Ok(router.finish())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Settings used when no config file is given.
pub fn demo_settings() -> Settings {
    Settings {
        debug: true,
        allowed_hosts: vec!["localhost:8000".to_string()],
        ..Settings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteParams, RouteResolver};

    #[test]
    fn test_demo_routes_queue_healthchecks() {
        let client = Arc::new(HealthcheckClient::new(demo_settings()));
        let server = AppServer::new(client.clone()).unwrap();

        assert_eq!(client.pending(), 4);
        assert_eq!(
            server
                .routes()
                .reverse("status", RouteParams::None, Some("internal"))
                .unwrap(),
            "/internal/status"
        );

        let drained = client.drain(server.routes()).unwrap();
        let names: Vec<_> = drained.iter().map(|h| h.display_name().to_string()).collect();
        assert_eq!(
            names,
            [
                "GET localhost:8000/internal/status",
                "GET localhost:8000/",
                "GET localhost:8000/search/Acme",
                "Lead API Update",
            ]
        );
        assert!(drained.iter().all(|h| h.serialize().is_ok()));
    }
}
