//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → owned by HealthcheckClient, read through typed accessors
//! ```
//!
//! # Design Decisions
//! - Settings are resolved once at startup; no dynamic probing afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, parse_settings, LoadError};
pub use schema::{Environment, HealthchecksConfig, Settings, Strictness};
