//! Doctors command implementation
//!
//! This module implements the `doctors` command for browsing the doctor
//! directory.

use crate::adapters::store::RestStore;
use crate::cli::commands::exit_code_for;
use crate::config::load_config;
use crate::core::directory::load_doctors;
use crate::domain::Doctor;
use clap::Args;

/// Arguments for the doctors command
#[derive(Args, Debug)]
pub struct DoctorsArgs {
    /// Filter the directory by name, specialization, or department
    #[arg(short, long)]
    pub search: Option<String>,
}

impl DoctorsArgs {
    /// Execute the doctors command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let search = self.search.as_deref().unwrap_or("");
        tracing::info!(search, "Listing doctors");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Connect to the hosted store
        let store = match RestStore::new(&config.store, &config.session) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to build store client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let rows = match load_doctors(&store, search).await {
            Ok(rows) => rows,
            Err(e) => {
                println!("❌ Failed to load the doctor directory");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🩺 Doctor Directory");
        println!();

        if rows.is_empty() {
            println!("No doctors match.");
            return Ok(0);
        }

        println!("Found {} doctor(s):", rows.len());
        println!();
        println!(
            "{:<24} {:<20} {:<16} {:>6} {:>7} {:>9}",
            "Name", "Specialization", "Department", "Years", "Rating", "Patients"
        );
        println!("{}", "-".repeat(88));

        for row in &rows {
            match serde_json::from_value::<Doctor>(row.clone()) {
                Ok(doctor) => {
                    let rating = doctor
                        .rating
                        .map(|r| format!("{r:.1}"))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<24} {:<20} {:<16} {:>6} {:>7} {:>9}",
                        doctor.display_name(),
                        doctor.specialization,
                        doctor.department,
                        doctor.experience_years,
                        rating,
                        doctor.patient_count
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable doctor row");
                }
            }
        }

        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctors_args_defaults() {
        let args = DoctorsArgs { search: None };
        assert!(args.search.is_none());
    }
}
