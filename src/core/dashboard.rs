//! Dashboard metrics loader
//!
//! The overview page joins a handful of independent fetches: collection
//! counts, bill amounts for the revenue total, and the patient collection
//! for the recency ranking and the department histogram. The fetches run
//! concurrently and each one is individually fallible; a failed fetch
//! renders its safe default (zero or empty) with a warning instead of
//! taking the whole page down.

use crate::adapters::store::{DataStore, Filter, SelectQuery};
use crate::core::aggregate::{group_count, most_recent, sum_amounts};
use crate::domain::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Derived overview metrics for the dashboard page
#[derive(Debug, Clone, Default)]
pub struct DashboardMetrics {
    /// Total admitted patients
    pub patient_count: u64,
    /// Total doctors on the directory
    pub doctor_count: u64,
    /// Total staff members
    pub staff_count: u64,
    /// Rooms currently free for admission
    pub available_rooms: u64,
    /// Sum of all bill amounts
    pub total_revenue: f64,
    /// The most recently admitted patients, newest first
    pub recent_admissions: Vec<Value>,
    /// Patient count per department
    pub department_counts: HashMap<String, usize>,
}

/// Load the dashboard metrics
///
/// Issues the independent fetches concurrently and joins them once all
/// complete. This function never errors: every fetch failure degrades to
/// the corresponding default so the page always renders, and re-running
/// the command retries cleanly.
pub async fn load_dashboard(store: &dyn DataStore, recent_limit: usize) -> DashboardMetrics {
    let rooms_filter = [Filter::eq("is_occupied", "false")];
    let bills_query = SelectQuery::new().columns("amount");
    let patients_query =
        SelectQuery::new().columns("patient_id, full_name, department, admission_date");
    let (patients, doctors, staff, rooms, bills, patient_rows) = tokio::join!(
        store.count("patients", &[]),
        store.count("doctors", &[]),
        store.count("staff", &[]),
        store.count("rooms", &rooms_filter),
        store.select("bills", &bills_query),
        store.select("patients", &patients_query),
    );

    let bills = or_empty(bills, "bills");
    let patient_rows = or_empty(patient_rows, "patients");

    DashboardMetrics {
        patient_count: or_zero(patients, "patients"),
        doctor_count: or_zero(doctors, "doctors"),
        staff_count: or_zero(staff, "staff"),
        available_rooms: or_zero(rooms, "rooms"),
        total_revenue: sum_amounts(&bills),
        recent_admissions: most_recent(&patient_rows, recent_limit, "admission_date"),
        department_counts: group_count(&patient_rows, "department"),
    }
}

fn or_zero(result: Result<u64>, collection: &str) -> u64 {
    match result {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(collection, error = %e, "Count failed, rendering zero");
            0
        }
    }
}

fn or_empty(result: Result<Vec<Value>>, collection: &str) -> Vec<Value> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(collection, error = %e, "Fetch failed, rendering empty");
            Vec::new()
        }
    }
}
