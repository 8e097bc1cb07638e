//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the
//! `medboard.toml` file.

use crate::config::secret::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main Medboard configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedboardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Hosted data-store connection
    pub store: StoreConfig,

    /// Ambient session used to resolve the acting identity
    #[serde(default)]
    pub session: SessionConfig,

    /// Dashboard page tuning
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedboardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.dashboard.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (log writes instead of issuing them)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Hosted data-store configuration
///
/// The store is a PostgREST-style endpoint; the API key authenticates every
/// request and the row-level security policies behind it do their own
/// enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`
    pub base_url: String,

    /// Publishable API key sent as the `apikey` header
    pub api_key: SecretString,

    /// Postgres schema exposed by the REST endpoint
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates (disable only against local stacks)
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "store.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.api_key.expose_secret().is_empty() {
            return Err("store.api_key must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("store.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Ambient session configuration
///
/// The access token identifies the acting user; without one the commands
/// run unauthenticated and the identity resolves to no role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bearer token of the signed-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<SecretString>,

    /// Acting-user override for headless runs; skips the auth endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Dashboard page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How many recent admissions the overview lists
    #[serde(default = "default_recent_patients")]
    pub recent_patients: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_patients: default_recent_patients(),
        }
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<(), String> {
        if self.recent_patients == 0 {
            return Err("dashboard.recent_patients must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a local rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in megabytes
    #[serde(default = "default_max_size_mb")]
    pub local_max_size_mb: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
            local_max_size_mb: default_max_size_mb(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_recent_patients() -> usize {
    5
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_max_size_mb() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn config() -> MedboardConfig {
        MedboardConfig {
            application: ApplicationConfig::default(),
            store: StoreConfig {
                base_url: "https://example.supabase.co".to_string(),
                api_key: secret_string("anon-key".to_string()),
                schema: default_schema(),
                timeout_seconds: 30,
                tls_verify: true,
            },
            session: SessionConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_fails() {
        let mut c = config();
        c.application.log_level = "verbose".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_store_url_must_be_http() {
        let mut c = config();
        c.store.base_url = "example.supabase.co".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_empty_api_key_fails() {
        let mut c = config();
        c.store.api_key = secret_string(String::new());
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_recent_patients_fails() {
        let mut c = config();
        c.dashboard.recent_patients = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation_fails() {
        let mut c = config();
        c.logging.local_rotation = "weekly".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let c = config();
        assert_eq!(c.application.log_level, "info");
        assert!(!c.application.dry_run);
        assert_eq!(c.store.schema, "public");
        assert_eq!(c.dashboard.recent_patients, 5);
        assert!(!c.logging.local_enabled);
    }
}
