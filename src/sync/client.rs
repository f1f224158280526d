//! Queueing, deduplication and batch publishing of healthchecks.
//!
//! # Sync Cycle
//! ```text
//! IDLE → DRAINING → SERIALIZING → PUBLISHING → FLUSHING → IDLE
//! ```
//!
//! Nothing in `put()` raises except an unresolvable route. Every other outcome
//! becomes a [`Diagnostic`], flushed to the log in the order recorded.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::schema::DOCS_URL;
use crate::config::Settings;
use crate::error::{HealthcheckError, ResolutionError};
use crate::health::{Healthcheck, MonitorPayload, ResolvedHealthcheck};
use crate::routing::RouteResolver;
use crate::sync::diagnostics::{Diagnostic, Severity};
use crate::sync::transport::MonitorApi;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Outcome of one sync cycle.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// The PUT was sent and answered with a 2xx status.
    pub published: bool,
    /// Monitor definitions that passed validation.
    pub payload: Vec<MonitorPayload>,
    /// Diagnostics flushed at the end of the cycle.
    pub diagnostics: Vec<Diagnostic>,
}

impl SyncReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// Collects healthchecks during route registration and publishes them later.
///
/// Shared as `Arc<HealthcheckClient>` between the router builder and the
/// startup hook. The queue and diagnostics are mutex-guarded so registration
/// may happen from several threads.
#[derive(Debug)]
pub struct HealthcheckClient {
    settings: Settings,
    api: MonitorApi,
    queue: Mutex<Vec<Healthcheck>>,
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl HealthcheckClient {
    pub fn new(settings: Settings) -> Self {
        Self::with_http_client(settings, reqwest::Client::new())
    }

    pub fn with_http_client(settings: Settings, http: reqwest::Client) -> Self {
        let api = MonitorApi::new(http, settings.endpoint_url(), settings.request_timeout());
        Self {
            settings,
            api,
            queue: Mutex::new(Vec::new()),
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Queue a healthcheck for the next sync. Never resolves, never fails.
    pub fn enqueue(&self, mut healthcheck: Healthcheck) {
        healthcheck
            .dev
            .get_or_insert(self.settings.environment().is_dev());
        lock(&self.queue).push(healthcheck);
    }

    /// Number of healthchecks waiting for the next drain.
    pub fn pending(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Snapshot of diagnostics recorded since the last flush.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        lock(&self.diagnostics).clone()
    }

    fn record(&self, severity: Severity, message: impl Into<String>) {
        lock(&self.diagnostics).push(Diagnostic::new(severity, message));
    }

    /// Emit and clear all recorded diagnostics.
    fn flush(&self) -> Vec<Diagnostic> {
        let flushed = std::mem::take(&mut *lock(&self.diagnostics));
        for diagnostic in &flushed {
            diagnostic.emit();
        }
        flushed
    }

    /// Resolve every queued healthcheck and collapse duplicates by identity code.
    ///
    /// The queue is emptied even when resolution fails part way. The last
    /// definition of a code wins; the dropped one is named in a warning.
    pub fn drain(
        &self,
        resolver: &dyn RouteResolver,
    ) -> Result<Vec<ResolvedHealthcheck>, HealthcheckError> {
        let queued = std::mem::take(&mut *lock(&self.queue));

        let mut distinct: Vec<ResolvedHealthcheck> = Vec::with_capacity(queued.len());
        let mut by_code: HashMap<String, usize> = HashMap::new();

        for healthcheck in queued {
            let resolved = healthcheck.resolve(resolver, &self.settings)?;
            match by_code.get(resolved.code()) {
                Some(&index) => {
                    self.record(
                        Severity::Warning,
                        format!(
                            "Duplicate definition for {}, last one wins",
                            distinct[index].display_name()
                        ),
                    );
                    distinct[index] = resolved;
                }
                None => {
                    by_code.insert(resolved.code().to_string(), distinct.len());
                    distinct.push(resolved);
                }
            }
        }

        Ok(distinct)
    }

    /// Run one sync cycle over the queue plus `additional` healthchecks.
    ///
    /// Only a [`ResolutionError`] escapes; everything else is reported through
    /// the returned diagnostics.
    pub async fn put(
        &self,
        resolver: &dyn RouteResolver,
        additional: Vec<Healthcheck>,
    ) -> Result<SyncReport, ResolutionError> {
        for healthcheck in additional {
            self.enqueue(healthcheck);
        }

        let healthchecks = match self.drain(resolver) {
            Ok(healthchecks) => healthchecks,
            Err(HealthcheckError::Resolution(e)) => {
                self.flush();
                return Err(e);
            }
            Err(HealthcheckError::Configuration(e)) => {
                self.record(Severity::Error, e.to_string());
                return Ok(SyncReport {
                    diagnostics: self.flush(),
                    ..SyncReport::default()
                });
            }
        };

        if healthchecks.is_empty() {
            self.record(
                Severity::Warning,
                format!("No health checks defined. See {} to get started.", DOCS_URL),
            );
            return Ok(SyncReport {
                diagnostics: self.flush(),
                ..SyncReport::default()
            });
        }

        let mut payload = Vec::with_capacity(healthchecks.len());
        for healthcheck in &healthchecks {
            match healthcheck.serialize() {
                Ok(monitor) => payload.push(monitor),
                Err(e) => self.record(
                    Severity::Error,
                    format!(
                        "Healthcheck {} can not be published. Validation error: {}",
                        healthcheck.display_name(),
                        e
                    ),
                ),
            }
        }

        let mut published = false;
        match self.settings.api_key() {
            Some(api_key) => match self.api.put_monitors(api_key, &payload).await {
                Ok(()) => published = true,
                Err(e) => self.record(
                    Severity::Error,
                    format!(
                        "Healthchecks could not be published. Request failure. Details:\n\n{}",
                        e
                    ),
                ),
            },
            None => self.record(
                Severity::Error,
                "Missing API key. Set healthchecks.api_key to publish healthchecks.",
            ),
        }

        if self.settings.environment().is_dev() {
            self.record(
                Severity::Info,
                "DEV MODE: debug is true. Monitors will be created in dev mode.",
            );
        }

        let pretty = serde_json::to_string_pretty(&payload).unwrap_or_else(|e| e.to_string());
        self.record(
            Severity::Debug,
            format!("PUT {}:\n{}\n\n", self.api.endpoint(), pretty),
        );

        Ok(SyncReport {
            published,
            payload,
            diagnostics: self.flush(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteTable;

    fn client(debug: bool) -> HealthcheckClient {
        let mut settings = Settings {
            debug,
            ..Settings::default()
        };
        settings.hostname = Some("cronitor.io".to_string());
        HealthcheckClient::new(settings)
    }

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table.insert(None, "login", "/login");
        table.insert(None, "logout", "/logout");
        table
    }

    #[test]
    fn test_enqueue_stamps_environment() {
        let client = client(true);
        client.enqueue(Healthcheck::new().route("login"));
        client.enqueue(Healthcheck::new().route("logout").dev(false));

        let drained = client.drain(&table()).unwrap();
        assert!(drained[0].is_dev());
        assert!(!drained[1].is_dev());
    }

    #[test]
    fn test_drain_empties_queue() {
        let client = client(false);
        client.enqueue(Healthcheck::new().route("login"));
        assert_eq!(client.pending(), 1);

        assert_eq!(client.drain(&table()).unwrap().len(), 1);
        assert_eq!(client.pending(), 0);
        assert!(client.drain(&table()).unwrap().is_empty());
        assert!(client.diagnostics().is_empty());
    }

    #[test]
    fn test_drain_deduplicates_last_wins() {
        let client = client(false);
        client.enqueue(Healthcheck::new().route("login").name("first"));
        client.enqueue(Healthcheck::new().route("logout"));
        client.enqueue(Healthcheck::new().route("login").name("second"));

        let drained = client.drain(&table()).unwrap();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].display_name(), "second");

        let diagnostics = client.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains("first"));
    }

    #[test]
    fn test_drain_fails_fast_and_still_empties_queue() {
        let client = client(false);
        client.enqueue(Healthcheck::new().route("missing"));
        client.enqueue(Healthcheck::new().route("login"));

        let err = client.drain(&table()).unwrap_err();
        assert!(matches!(err, HealthcheckError::Resolution(_)));
        assert_eq!(client.pending(), 0);
    }
}
