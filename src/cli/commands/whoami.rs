//! Whoami command implementation
//!
//! This module implements the `whoami` command: the resolved identity, its
//! role, and the navigation menu that role may see.

use crate::access::resolve_menu;
use crate::adapters::identity::{IdentityProvider, RestIdentity};
use crate::cli::commands::exit_code_for;
use crate::config::load_config;
use clap::Args;

/// Arguments for the whoami command
#[derive(Args, Debug)]
pub struct WhoamiArgs {}

impl WhoamiArgs {
    /// Execute the whoami command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Resolving identity");

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

        let identity = match identity.current_identity().await {
            Ok(i) => i,
            Err(e) => {
                println!("❌ Failed to resolve the current identity");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let role = match &identity {
            Some(identity) => {
                println!("👤 Signed in as: {}", identity.user_id);
                println!(
                    "   Role: {}",
                    identity
                        .role
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "(none)".to_string())
                );
                identity.role
            }
            None => {
                println!("👤 Not signed in");
                println!("   Set session.access_token in the configuration, or");
                println!("   MEDBOARD_SESSION_ACCESS_TOKEN in the environment.");
                None
            }
        };

        println!();
        println!("Navigation:");
        for destination in resolve_menu(role) {
            println!("  {:<12} {}", destination.label, destination.route);
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whoami_args_creation() {
        let args = WhoamiArgs {};
        let _ = format!("{args:?}");
    }
}
