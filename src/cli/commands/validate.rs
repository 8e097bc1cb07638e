//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Medboard configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Dry Run: {}", config.application.dry_run);
                println!("  Store URL: {}", config.store.base_url);
                println!("  Schema: {}", config.store.schema);
                println!("  Timeout: {}s", config.store.timeout_seconds);
                println!("  TLS Verify: {}", config.store.tls_verify);
                println!(
                    "  Session Token: {}",
                    if config.session.access_token.is_some() {
                        "configured"
                    } else {
                        "not set"
                    }
                );
                if let Some(user_id) = &config.session.user_id {
                    println!("  Acting User Override: {user_id}");
                }
                println!("  Recent Patients: {}", config.dashboard.recent_patients);
                println!("  Local Logging: {}", config.logging.local_enabled);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
