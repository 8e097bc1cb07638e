//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medboard.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Medboard configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set MEDBOARD_STORE_API_KEY to the project's publishable key");
                println!("     - Set MEDBOARD_SESSION_ACCESS_TOKEN to a signed-in user's token");
                println!("  3. Validate configuration: medboard validate-config");
                println!("  4. Check your role: medboard whoami");
                println!("  5. Open the overview: medboard dashboard");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Medboard Configuration File
# Role-aware hospital operations console

[application]
log_level = "info"
dry_run = false

[store]
base_url = "https://xyzcompany.supabase.co"
api_key = "${MEDBOARD_STORE_API_KEY}"
schema = "public"
timeout_seconds = 30
tls_verify = true

[session]
access_token = "${MEDBOARD_SESSION_ACCESS_TOKEN}"

[dashboard]
recent_patients = 5

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Medboard Configuration File
# Role-aware hospital operations console
#
# This file contains all configuration options with examples and explanations.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (log writes instead of issuing them)
dry_run = false

# ============================================================================
# Hosted Data Store
# ============================================================================
[store]
# Project base URL
base_url = "https://xyzcompany.supabase.co"

# Publishable API key, sent as the apikey header (use environment variable)
api_key = "${MEDBOARD_STORE_API_KEY}"

# Postgres schema exposed by the REST endpoint
schema = "public"

# Per-request timeout in seconds
timeout_seconds = 30

# TLS certificate verification (disable only against local stacks)
tls_verify = true

# ============================================================================
# Session
# ============================================================================
[session]
# Bearer token of the signed-in user; the backend's row-level security
# policies decide what this token may touch
access_token = "${MEDBOARD_SESSION_ACCESS_TOKEN}"

# Optional: act as a known user without a live token (headless runs)
# user_id = "9f3e6c1a-7d2b-4c8e-9a5f-1b2c3d4e5f6a"

# ============================================================================
# Dashboard
# ============================================================================
[dashboard]
# How many recent admissions the overview lists
recent_patients = 5

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging (JSON, rotated)
local_enabled = false

# Local log file path
local_path = "logs"

# Log rotation (daily or hourly)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}
