//! Fully-qualified healthcheck URLs.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::config::Settings;
use crate::error::ConfigurationError;

/// The URL a healthcheck requests, plus a short form used for naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthcheckUrl {
    full: String,
    display: String,
}

impl HealthcheckUrl {
    /// Build from a resolved path and query parameters.
    ///
    /// The query string only appears in the full URL so that the display form,
    /// and therefore the identity code, does not depend on query values.
    pub fn new(
        path: &str,
        query: &BTreeMap<String, String>,
        settings: &Settings,
    ) -> Result<Self, ConfigurationError> {
        let scheme = if settings.https() { "https://" } else { "http://" };
        let hostname = discover_hostname(settings)?;

        let query = if query.is_empty() {
            String::new()
        } else {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter())
                .finish();
            format!("?{}", encoded)
        };

        Ok(Self {
            full: format!("{}{}{}{}", scheme, hostname, path, query),
            display: format!("{}{}", hostname, path),
        })
    }

    pub fn full_url(&self) -> &str {
        &self.full
    }

    pub fn display_url(&self) -> &str {
        &self.display
    }
}

/// First non-empty of `healthchecks.hostname`, `hostname`, `allowed_hosts[0]`.
pub fn discover_hostname(settings: &Settings) -> Result<&str, ConfigurationError> {
    settings
        .hostname_candidates()
        .into_iter()
        .flatten()
        .next()
        .ok_or(ConfigurationError::MissingHostname)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_hostname(host: &str) -> Settings {
        let mut settings = Settings::default();
        settings.healthchecks.hostname = Some(host.to_string());
        settings
    }

    #[test]
    fn test_hostname_from_namespace() {
        let mut settings = with_hostname("cronitor.io");
        settings.hostname = Some("other.test".to_string());
        let url = HealthcheckUrl::new("/path/to/endpoint", &BTreeMap::new(), &settings).unwrap();
        assert_eq!(url.full_url(), "http://cronitor.io/path/to/endpoint");
    }

    #[test]
    fn test_hostname_fallback_to_global() {
        let settings = Settings {
            hostname: Some("cronitor.io".to_string()),
            allowed_hosts: vec!["other.test".to_string()],
            ..Settings::default()
        };
        assert_eq!(discover_hostname(&settings).unwrap(), "cronitor.io");
    }

    #[test]
    fn test_hostname_fallback_to_allowed_hosts() {
        let settings = Settings {
            allowed_hosts: vec!["example.test".to_string()],
            ..Settings::default()
        };
        let url = HealthcheckUrl::new("/", &BTreeMap::new(), &settings).unwrap();
        assert!(url.full_url().contains("example.test"));
    }

    #[test]
    fn test_missing_hostname() {
        let err = HealthcheckUrl::new("/", &BTreeMap::new(), &Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingHostname));
        let message = err.to_string();
        assert!(message.contains("healthchecks.hostname"));
        assert!(message.contains("allowed_hosts"));
    }

    #[test]
    fn test_https_scheme() {
        let mut settings = with_hostname("cronitor.io");
        settings.healthchecks.https = Some(true);
        let url = HealthcheckUrl::new("/login", &BTreeMap::new(), &settings).unwrap();
        assert!(url.full_url().starts_with("https://"));
    }

    #[test]
    fn test_query_in_full_url_only() {
        let settings = with_hostname("cronitor.io");
        let query: BTreeMap<String, String> = [("foo", "bar"), ("bar", "foo baz")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let url = HealthcheckUrl::new("/path/to/endpoint", &query, &settings).unwrap();
        assert_eq!(
            url.full_url(),
            "http://cronitor.io/path/to/endpoint?bar=foo+baz&foo=bar"
        );
        assert_eq!(url.display_url(), "cronitor.io/path/to/endpoint");
    }
}
