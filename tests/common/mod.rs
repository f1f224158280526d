//! Shared utilities for integration tests.

use auto_healthchecks::config::Settings;
use auto_healthchecks::routing::RouteTable;
use auto_healthchecks::sync::HealthcheckClient;
use wiremock::MockServer;

pub const API_KEY: &str = "this is a key";
pub const MONITORS_PATH: &str = "/v3/monitors";

/// Settings pointing the sync client at a mock monitoring API.
pub fn settings_for(server: &MockServer, api_key: Option<&str>, debug: bool) -> Settings {
    let mut settings = Settings {
        debug,
        hostname: Some("cronitor.io".to_string()),
        ..Settings::default()
    };
    settings.healthchecks.api_key = api_key.map(str::to_string);
    settings.healthchecks.endpoint_url = format!("{}{}", server.uri(), MONITORS_PATH);
    settings
}

/// A client that never goes through a system proxy.
pub fn client(settings: Settings) -> HealthcheckClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    HealthcheckClient::with_http_client(settings, http)
}

#[allow(dead_code)]
pub fn route_table() -> RouteTable {
    let mut table = RouteTable::new();
    table.insert(None, "index", "/");
    table.insert(None, "login", "/login");
    table.insert(None, "search", "/search/{query}");
    table
}
