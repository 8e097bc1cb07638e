//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedboardConfig;
use super::secret::secret_string;
use crate::domain::errors::MedboardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`MedboardConfig`]
/// 4. Applies environment variable overrides (`MEDBOARD_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<MedboardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedboardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedboardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MedboardConfig = toml::from_str(&contents)
        .map_err(|e| MedboardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MedboardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched so documentation examples don't demand
/// real variables.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MedboardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `MEDBOARD_*` prefix
///
/// Variables follow the pattern `MEDBOARD_<SECTION>_<KEY>`, for example
/// `MEDBOARD_STORE_BASE_URL` or `MEDBOARD_APPLICATION_LOG_LEVEL`.
fn apply_env_overrides(config: &mut MedboardConfig) {
    if let Ok(val) = std::env::var("MEDBOARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDBOARD_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("MEDBOARD_STORE_BASE_URL") {
        config.store.base_url = val;
    }
    if let Ok(val) = std::env::var("MEDBOARD_STORE_API_KEY") {
        config.store.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("MEDBOARD_STORE_SCHEMA") {
        config.store.schema = val;
    }
    if let Ok(val) = std::env::var("MEDBOARD_STORE_TIMEOUT_SECONDS") {
        if let Ok(parsed) = val.parse() {
            config.store.timeout_seconds = parsed;
        }
    }

    if let Ok(val) = std::env::var("MEDBOARD_SESSION_ACCESS_TOKEN") {
        config.session.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDBOARD_SESSION_USER_ID") {
        config.session.user_id = Some(val);
    }

    if let Ok(val) = std::env::var("MEDBOARD_DASHBOARD_RECENT_PATIENTS") {
        if let Ok(parsed) = val.parse() {
            config.dashboard.recent_patients = parsed;
        }
    }
}
