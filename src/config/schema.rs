//! Configuration schema definitions.
//!
//! This module defines the settings shared by the host application and the
//! healthcheck sync engine. All types derive Serde traits for deserialization
//! from config files.
//!
//! # Lookup Precedence
//! Each accessor documents its order. The general rule is: the `[healthchecks]`
//! namespace first, then the matching global key, then a hard-coded default.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default remote endpoint for monitor definitions.
pub const DEFAULT_ENDPOINT_URL: &str = "https://cronitor.io/v3/monitors";

/// Documentation pointer used in diagnostics.
pub const DOCS_URL: &str = "https://cronitor.io/docs/django-health-checks";

/// Root settings object, resolved once at startup.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Host application development flag.
    pub debug: bool,

    /// Explicit strictness; derived from `debug` when absent.
    pub strictness: Option<Strictness>,

    /// Global hostname of the host application.
    pub hostname: Option<String>,

    /// Hosts the application answers to; the first entry is a hostname fallback.
    pub allowed_hosts: Vec<String>,

    /// Global API credential, used when `healthchecks.api_key` is unset.
    pub api_key: Option<String>,

    /// Global scheme flag, used when `healthchecks.https` is unset.
    pub https: Option<bool>,

    /// Global default tags, used when `healthchecks.tags` is unset.
    pub tags: Option<Vec<String>>,

    /// Demo server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Healthcheck module namespace.
    pub healthchecks: HealthchecksConfig,
}

/// Whether tolerated declaration problems become hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Development: conflicting parameters and misplaced healthchecks fail.
    Strict,
    /// Production: the same problems are ignored so a running service never crashes.
    Lenient,
}

/// Environment discriminator folded into identity codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn is_dev(self) -> bool {
        matches!(self, Environment::Dev)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

/// Demo server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// The `[healthchecks]` namespace.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthchecksConfig {
    /// Credential for the monitoring API. No key means no PUT.
    pub api_key: Option<String>,

    /// Build healthcheck URLs with `https://`.
    pub https: Option<bool>,

    /// Tags merged into every monitor.
    pub tags: Option<Vec<String>>,

    /// Hostname used in healthcheck URLs; highest priority.
    pub hostname: Option<String>,

    /// Monitoring API endpoint receiving the batch PUT.
    pub endpoint_url: String,

    /// Timeout for the PUT in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthchecksConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            https: None,
            tags: None,
            hostname: None,
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Settings {
    /// API credential: `healthchecks.api_key`, then `api_key`, else none.
    /// Empty counts as none.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.healthchecks.api_key).or_else(|| non_empty(&self.api_key))
    }

    /// Scheme flag: `healthchecks.https`, then `https`, default false.
    pub fn https(&self) -> bool {
        self.healthchecks.https.or(self.https).unwrap_or(false)
    }

    /// Tags merged into every monitor: `healthchecks.tags`, then `tags`,
    /// default empty.
    pub fn default_tags(&self) -> &[String] {
        self.healthchecks
            .tags
            .as_deref()
            .or(self.tags.as_deref())
            .unwrap_or_default()
    }

    /// Hostname candidates in lookup order:
    /// `healthchecks.hostname`, then `hostname`, then `allowed_hosts[0]`.
    pub fn hostname_candidates(&self) -> [Option<&str>; 3] {
        [
            non_empty(&self.healthchecks.hostname),
            non_empty(&self.hostname),
            self.allowed_hosts.first().map(String::as_str).filter(|h| !h.is_empty()),
        ]
    }

    pub fn environment(&self) -> Environment {
        if self.debug {
            Environment::Dev
        } else {
            Environment::Prod
        }
    }

    /// Explicit `strictness`, else `Strict` in debug and `Lenient` otherwise.
    pub fn strictness(&self) -> Strictness {
        self.strictness.unwrap_or(if self.debug {
            Strictness::Strict
        } else {
            Strictness::Lenient
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.healthchecks.endpoint_url
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.healthchecks.timeout_secs)
    }
}
