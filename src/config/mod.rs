//! Configuration management for Medboard.
//!
//! TOML-based configuration with environment variable substitution
//! (`${VAR_NAME}`), `MEDBOARD_*` overrides, and validation on load.
//!
//! # Example configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! base_url = "https://xyzcompany.supabase.co"
//! api_key = "${MEDBOARD_STORE_API_KEY}"
//!
//! [session]
//! access_token = "${MEDBOARD_SESSION_ACCESS_TOKEN}"
//!
//! [dashboard]
//! recent_patients = 5
//! ```
//!
//! Credentials are wrapped in [`SecretString`] so they never appear in
//! Debug output or logs.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DashboardConfig, LoggingConfig, MedboardConfig, SessionConfig, StoreConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
