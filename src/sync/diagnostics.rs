//! Diagnostics collected during a sync cycle.

use std::fmt;

/// Severity of a diagnostic, mapped onto `tracing` levels on flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Write this diagnostic to the log.
    pub fn emit(&self) {
        let message = &self.message;
        match self.severity {
            Severity::Debug => tracing::debug!(target: "auto_healthchecks::sync", "{}", message),
            Severity::Info => tracing::info!(target: "auto_healthchecks::sync", "{}", message),
            Severity::Warning => tracing::warn!(target: "auto_healthchecks::sync", "{}", message),
            Severity::Error => tracing::error!(target: "auto_healthchecks::sync", "{}", message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
