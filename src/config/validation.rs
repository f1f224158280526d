//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the endpoint is a usable http(s) URL
//! - Validate value ranges (timeout > 0)
//! - Reject hostnames that carry a scheme or path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationIssue>>

use std::fmt;

use crate::config::schema::Settings;

/// A single semantic problem in a settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let hc = &settings.healthchecks;

    match url::Url::parse(&hc.endpoint_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => issues.push(ValidationIssue {
            field: "healthchecks.endpoint_url",
            message: format!("unsupported scheme {:?}", parsed.scheme()),
        }),
        Err(e) => issues.push(ValidationIssue {
            field: "healthchecks.endpoint_url",
            message: e.to_string(),
        }),
    }

    if hc.timeout_secs == 0 {
        issues.push(ValidationIssue {
            field: "healthchecks.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    let tag_lists = [
        ("healthchecks.tags", hc.tags.as_deref()),
        ("tags", settings.tags.as_deref()),
    ];
    for (field, tags) in tag_lists {
        if tags.is_some_and(|tags| tags.iter().any(|t| t.trim().is_empty())) {
            issues.push(ValidationIssue {
                field,
                message: "tags must be non-empty strings".to_string(),
            });
        }
    }

    let hostnames = [
        ("healthchecks.hostname", hc.hostname.as_deref()),
        ("hostname", settings.hostname.as_deref()),
    ];
    for (field, host) in hostnames {
        if let Some(host) = host {
            if host.contains("://") || host.contains('/') {
                issues.push(ValidationIssue {
                    field,
                    message: format!("{:?} must be a bare host without scheme or path", host),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
