//! Error taxonomy for healthcheck declaration, resolution and sync.
//!
//! # Propagation
//! - `ResolutionError`: escapes `resolve()`, `drain()` and `put()` (programming defect)
//! - `ConfigurationError`: escapes registration-time strict checks, becomes a
//!   diagnostic on the sync path
//! - `ValidationError`: per declaration, dropped from the batch with a diagnostic
//! - `TransportError`: captured as a diagnostic, never propagated

use thiserror::Error;

/// A required setting is absent or unusable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(
        "Could not determine hostname from healthchecks.hostname, hostname or allowed_hosts"
    )]
    MissingHostname,

    #[error("Healthchecks must be defined on individual routes, not on nested router at {path}")]
    HealthcheckOnInclude { path: String },
}

/// A declaration cannot be turned into a concrete path.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Healthcheck {display} has neither a route name nor an explicit path")]
    MissingRoute { display: String },

    #[error("Cannot reverse route \"{route}\" with both positional and named parameters")]
    ConflictingParams { route: String },

    #[error(
        "Could not reverse route for {route} ({reason}). \
         Provide an `app_scope` hint in your healthcheck definition."
    )]
    NoReverseMatch { route: String, reason: String },
}

/// A resolved declaration carries a field the remote API cannot accept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Healthcheck request method must be GET, POST, PUT, HEAD, OPTIONS or PATCH, got {0:?}")]
    InvalidMethod(String),

    #[error("Healthcheck request timeout_seconds must be a non-negative integer, got {0}")]
    NegativeTimeout(i64),

    #[error("Healthcheck interval_seconds must be a positive integer, got {0}")]
    NonPositiveInterval(i64),

    #[error("Healthcheck assertion #{0} must be an object")]
    RuleNotObject(usize),
}

/// The PUT to the monitoring API failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors raised out of `resolve()` and `drain()`.
#[derive(Debug, Error)]
pub enum HealthcheckError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}
