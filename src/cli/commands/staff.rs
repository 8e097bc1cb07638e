//! Staff command implementation
//!
//! This module implements the admin-only `staff` command. The capability
//! check happens client-side, before any store call, with the backend's
//! row-level security as the independent second layer.

use crate::adapters::identity::{IdentityProvider, RestIdentity};
use crate::adapters::store::RestStore;
use crate::cli::commands::exit_code_for;
use crate::config::load_config;
use crate::core::directory::load_staff;
use crate::domain::StaffMember;
use clap::Args;

/// Arguments for the staff command
#[derive(Args, Debug)]
pub struct StaffArgs {
    /// Filter the directory by name, employee id, department, or job title
    #[arg(short, long)]
    pub search: Option<String>,
}

impl StaffArgs {
    /// Execute the staff command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let search = self.search.as_deref().unwrap_or("");
        tracing::info!(search, "Listing staff");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Connect to the hosted store and resolve the acting identity
        let store = match RestStore::new(&config.store, &config.session) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to build store client");
                println!("   Error: {e}");
                return Ok(2);
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
        let role = identity.as_ref().and_then(|i| i.role);

        let rows = match load_staff(&store, role, search).await {
            Ok(rows) => rows,
            Err(e) => {
                println!("❌ Failed to load the staff directory");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("👥 Staff Directory");
        println!();

        if rows.is_empty() {
            println!("No staff members match.");
            return Ok(0);
        }

        println!("Found {} staff member(s):", rows.len());
        println!();
        println!(
            "{:<24} {:<10} {:<16} {:<16} {:<8} {:<12}",
            "Name", "ID", "Department", "Role", "Shift", "Joined"
        );
        println!("{}", "-".repeat(90));

        for row in &rows {
            match serde_json::from_value::<StaffMember>(row.clone()) {
                Ok(staff) => {
                    println!(
                        "{:<24} {:<10} {:<16} {:<16} {:<8} {:<12}",
                        staff.display_name(),
                        staff.employee_id,
                        staff.department,
                        staff.role,
                        staff.shift.as_deref().unwrap_or("-"),
                        staff.joined_date
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable staff row");
                }
            }
        }

        println!();
        Ok(0)
    }
}
