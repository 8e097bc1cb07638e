//! Dashboard command implementation
//!
//! This module implements the `dashboard` command for displaying the
//! hospital overview metrics.

use crate::adapters::store::RestStore;
use crate::config::load_config;
use crate::core::dashboard::load_dashboard;
use crate::core::filter::field_text;
use clap::Args;

/// Arguments for the dashboard command
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Override how many recent admissions to list
    #[arg(long)]
    pub recent: Option<usize>,
}

impl DashboardArgs {
    /// Execute the dashboard command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Loading dashboard");

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

        let recent_limit = self.recent.unwrap_or(config.dashboard.recent_patients);
        let metrics = load_dashboard(&store, recent_limit).await;

        println!("🏥 Hospital Overview");
        println!();
        println!("  Patients:        {}", metrics.patient_count);
        println!("  Doctors:         {}", metrics.doctor_count);
        println!("  Staff:           {}", metrics.staff_count);
        println!("  Available rooms: {}", metrics.available_rooms);
        println!("  Total revenue:   ${:.2}", metrics.total_revenue);
        println!();

        println!("Recent admissions:");
        if metrics.recent_admissions.is_empty() {
            println!("  (none)");
        }
        for row in &metrics.recent_admissions {
            let admitted = field_text(row, "admission_date");
            println!(
                "  {:<10} {:<24} {:<16} {}",
                field_text(row, "patient_id"),
                field_text(row, "full_name"),
                field_text(row, "department"),
                admitted.get(..10).unwrap_or(&admitted),
            );
        }
        println!();

        println!("Patients by department:");
        if metrics.department_counts.is_empty() {
            println!("  (none)");
        }
        // The histogram is an unordered mapping; sort for stable display.
        let mut departments: Vec<_> = metrics.department_counts.iter().collect();
        departments.sort();
        for (department, count) in departments {
            println!("  {:<20} {}", department, count);
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_args_defaults() {
        let args = DashboardArgs { recent: None };
        assert!(args.recent.is_none());
    }
}
