//! End-to-end sync cycles against a mock monitoring API.

use auto_healthchecks::health::Healthcheck;
use auto_healthchecks::routing::RouteTable;
use auto_healthchecks::sync::Severity;
use auto_healthchecks::{sync_batch, ResolutionError};
use serde_json::{json, Value};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_put_publishes_single_batch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(common::MONITORS_PATH))
        .and(basic_auth(common::API_KEY, ""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    let table = common::route_table();
    client.enqueue(Healthcheck::new().route("login").tag("auth"));

    let report = client.put(&table, Vec::new()).await.unwrap();
    assert!(report.published);
    assert!(!report.has_errors());
    assert_eq!(report.payload.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, serde_json::to_value(&report.payload).unwrap());
    assert_eq!(body[0]["type"], "healthcheck");
    assert_eq!(body[0]["defaultName"], "GET cronitor.io/login");
    assert_eq!(body[0]["request"], json!({"url": "http://cronitor.io/login", "method": "GET"}));
}

#[tokio::test]
async fn test_put_uses_global_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(common::MONITORS_PATH))
        .and(basic_auth(common::API_KEY, ""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = common::settings_for(&server, None, false);
    settings.api_key = Some(common::API_KEY.to_string());
    let client = common::client(settings);
    client.enqueue(Healthcheck::new().route("login"));

    let report = client.put(&common::route_table(), Vec::new()).await.unwrap();
    assert!(report.published);
    assert!(!report.has_errors());
}

#[tokio::test]
async fn test_put_without_api_key_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, None, true));
    client.enqueue(Healthcheck::new().route("index"));

    let report = client.put(&common::route_table(), Vec::new()).await.unwrap();
    assert!(!report.published);
    assert_eq!(report.payload.len(), 1);

    let errors: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Missing API key"));

    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Info && d.message.contains("DEV MODE")));
    assert!(client.diagnostics().is_empty(), "diagnostics flushed");
}

#[tokio::test]
async fn test_put_server_error_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    client.enqueue(Healthcheck::new().route("index"));

    let report = client.put(&common::route_table(), Vec::new()).await.unwrap();
    assert!(!report.published);
    assert_eq!(report.diagnostics[0].severity, Severity::Error);
    assert!(report.diagnostics[0].message.contains("Request failure"));
    assert!(report.diagnostics[0].message.contains("upstream exploded"));

    let last = report.diagnostics.last().unwrap();
    assert_eq!(last.severity, Severity::Debug);
    assert!(last.message.contains("\"code\""));
}

#[tokio::test]
async fn test_put_with_nothing_queued_warns() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    let report = client.put(&RouteTable::new(), Vec::new()).await.unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
    assert!(report.diagnostics[0].message.contains("No health checks defined"));
}

#[tokio::test]
async fn test_invalid_declaration_dropped_rest_published() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    client.enqueue(Healthcheck::new().route("index").method("TRACE"));
    client.enqueue(Healthcheck::new().route("login"));

    let report = client.put(&common::route_table(), Vec::new()).await.unwrap();
    assert!(report.published);
    assert_eq!(report.payload.len(), 1);
    assert_eq!(report.payload[0].default_name, "GET cronitor.io/login");
    assert!(report.diagnostics[0].message.contains("Validation error"));
}

#[tokio::test]
async fn test_batch_merges_with_queue_and_dedupes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    client.enqueue(Healthcheck::new().route("login").name("from routes"));

    let batch = vec![
        Healthcheck::new().path("/login").name("from batch"),
        Healthcheck::new().route("search").kwarg("query", "Acme"),
    ];
    let report = sync_batch(&client, &common::route_table(), batch).await.unwrap();

    assert_eq!(report.payload.len(), 2);
    assert_eq!(report.payload[0].name.as_deref(), Some("from batch"));
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning && d.message.contains("from routes")));
}

#[tokio::test]
async fn test_unresolvable_route_escapes_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::client(common::settings_for(&server, Some(common::API_KEY), false));
    client.enqueue(Healthcheck::new().route("does-not-exist"));

    let err = client.put(&common::route_table(), Vec::new()).await.unwrap_err();
    assert!(matches!(err, ResolutionError::NoReverseMatch { .. }));
    assert_eq!(client.pending(), 0);
}

#[tokio::test]
async fn test_missing_hostname_becomes_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = common::settings_for(&server, Some(common::API_KEY), false);
    settings.hostname = None;
    let client = common::client(settings);
    client.enqueue(Healthcheck::new().route("index"));

    let report = client.put(&common::route_table(), Vec::new()).await.unwrap();
    assert!(!report.published);
    assert!(report.has_errors());
    assert!(report.diagnostics[0].message.contains("hostname"));
}
