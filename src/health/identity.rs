//! Stable identity codes and default names for healthchecks.
//!
//! The identity code binds a declaration to a remote monitor across syncs, so it
//! is derived only from the environment and the default name. Renaming a
//! monitor never changes its code.

use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::config::Environment;

/// Length of a derived identity code.
pub const IDENTITY_CODE_LEN: usize = 12;

/// `"{METHOD} {display_url}"`, e.g. `GET cronitor.io/login`.
pub fn default_name(method: &str, display_url: &str) -> String {
    format!("{} {}", method, display_url)
}

/// Hash of environment + default name, base64 encoded, reduced to alphanumerics
/// and truncated to [`IDENTITY_CODE_LEN`].
pub fn identity_code(environment: Environment, default_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(environment.as_str().as_bytes());
    hasher.update(default_name.as_bytes());
    let encoded = general_purpose::STANDARD.encode(hasher.finalize());

    encoded
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(IDENTITY_CODE_LEN)
        .collect()
}
