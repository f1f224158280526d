//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationIssue};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<Settings, LoadError> {
    let settings: Settings = toml::from_str(content)?;
    validate_settings(&settings).map_err(LoadError::Validation)?;
    Ok(settings)
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_settings_from_file() {
        let path = std::env::temp_dir().join(format!(
            "auto-healthchecks-settings-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            "hostname = \"example.test\"\n[healthchecks]\napi_key = \"k\"\n",
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(settings.hostname.as_deref(), Some("example.test"));
        assert_eq!(settings.api_key(), Some("k"));
    }

    #[test]
    fn test_parse_global_healthcheck_keys() {
        let settings = parse_settings(
            "hostname = \"example.test\"\napi_key = \"k\"\nhttps = true\ntags = [\"infra\"]\n",
        )
        .unwrap();

        assert_eq!(settings.api_key(), Some("k"));
        assert!(settings.https());
        assert_eq!(settings.default_tags(), ["infra".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_settings(Path::new("/nonexistent/healthchecks.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_validation_failure_lists_issues() {
        let err = parse_settings("[healthchecks]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
        assert!(err.to_string().contains("healthchecks.timeout_secs"));
    }
}
