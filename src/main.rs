//! Demo host application with route-level healthchecks.
//!
//! # Architecture Overview
//!
//! ```text
//!   settings (TOML) ──▶ HealthcheckClient ◀── enqueue ── HealthcheckRouter::route
//!                              │                               │
//!                              │                          finish()
//!                              │                               ▼
//!                              │                          RouteTable
//!                              │                               │
//!                              └──── put(resolver) ◀───────────┘
//!                                        │
//!                     drain → serialize → PUT monitors → flush diagnostics
//! ```
//!
//! Usage: `auto-healthchecks [settings.toml]`

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use auto_healthchecks::config::load_settings;
use auto_healthchecks::http::server::demo_settings;
use auto_healthchecks::http::AppServer;
use auto_healthchecks::observability::logging;
use auto_healthchecks::sync::HealthcheckClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_settings(&path)?,
        None => demo_settings(),
    };

    logging::init(&settings.observability.log_level);
    tracing::info!("auto-healthchecks v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %settings.server.bind_address,
        environment = settings.environment().as_str(),
        strictness = ?settings.strictness(),
        api_key_configured = settings.api_key().is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&settings.server.bind_address).await?;
    let client = Arc::new(HealthcheckClient::new(settings));
    let server = AppServer::new(client)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
