//! Logout command implementation
//!
//! This module implements the `logout` command for ending the current
//! session.

use crate::adapters::identity::{IdentityProvider, RestIdentity};
use crate::cli::commands::exit_code_for;
use crate::config::load_config;
use clap::Args;

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {}

impl LogoutArgs {
    /// Execute the logout command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Signing out");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let identity = match RestIdentity::new(&config.store, &config.session) {
            Ok(i) => i,
            Err(e) => {
                println!("❌ Failed to build identity client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match identity.sign_out().await {
            Ok(()) => {
                println!("✅ Signed out");
                println!("   Remove session.access_token from the configuration to forget the token.");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Sign-out failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
