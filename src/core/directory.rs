//! Directory page loaders
//!
//! Each directory fetches its collection once (with embedded resources where
//! the display needs them) and then narrows it with the shared client-side
//! filter. The staff directory is the one capability-gated page: the check
//! runs before any store call is issued.

use crate::access::{can_perform, Capability};
use crate::adapters::store::{DataStore, Filter, OrderBy, SelectQuery};
use crate::core::filter::filter_rows;
use crate::domain::{MedboardError, Result, Role, Room};
use serde_json::Value;

/// Fields the patient directory searches
pub const PATIENT_SEARCH_FIELDS: &[&str] = &["full_name", "patient_id", "department"];

/// Fields the doctor directory searches; the display name lives in the
/// embedded profile resource
pub const DOCTOR_SEARCH_FIELDS: &[&str] = &["profiles.full_name", "specialization", "department"];

/// Fields the staff directory searches
pub const STAFF_SEARCH_FIELDS: &[&str] =
    &["profiles.full_name", "employee_id", "department", "role"];

/// Load the patient directory, newest admission first
///
/// # Errors
///
/// Returns an error if the fetch fails; the caller decides whether to
/// degrade or surface it.
pub async fn load_patients(store: &dyn DataStore, search: &str) -> Result<Vec<Value>> {
    let query = SelectQuery::new()
        .columns("*, rooms(room_number)")
        .order(OrderBy::descending("admission_date"));
    let rows = store.select("patients", &query).await?;

    tracing::debug!(total = rows.len(), search, "Loaded patient directory");
    Ok(filter_rows(&rows, search, PATIENT_SEARCH_FIELDS))
}

/// Load the doctor directory, newest first
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub async fn load_doctors(store: &dyn DataStore, search: &str) -> Result<Vec<Value>> {
    let query = SelectQuery::new()
        .columns("*, profiles(full_name)")
        .order(OrderBy::descending("created_at"));
    let rows = store.select("doctors", &query).await?;

    tracing::debug!(total = rows.len(), search, "Loaded doctor directory");
    Ok(filter_rows(&rows, search, DOCTOR_SEARCH_FIELDS))
}

/// Load the staff directory
///
/// Admin-only: the capability check runs before the store is touched, and
/// the backend's row-level security enforces the same rule independently.
///
/// # Errors
///
/// Returns [`MedboardError::PermissionDenied`] for non-admin roles, or a
/// store error if the fetch fails.
pub async fn load_staff(
    store: &dyn DataStore,
    role: Option<Role>,
    search: &str,
) -> Result<Vec<Value>> {
    if !can_perform(role, Capability::ManageStaff) {
        return Err(MedboardError::PermissionDenied {
            role: role_name(role),
            action: Capability::ManageStaff.describe().to_string(),
        });
    }

    let query = SelectQuery::new()
        .columns("*, profiles(full_name)")
        .order(OrderBy::ascending("employee_id"));
    let rows = store.select("staff", &query).await?;

    tracing::debug!(total = rows.len(), search, "Loaded staff directory");
    Ok(filter_rows(&rows, search, STAFF_SEARCH_FIELDS))
}

/// Rooms currently free for admission, used as the admission-form source
///
/// Rows that fail to decode are skipped with a warning rather than failing
/// the whole listing.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub async fn available_rooms(store: &dyn DataStore) -> Result<Vec<Room>> {
    let query = SelectQuery::new()
        .filter(Filter::eq("is_occupied", "false"))
        .order(OrderBy::ascending("room_number"));
    let rows = store.select("rooms", &query).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<Room>(row) {
            Ok(room) => Some(room),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable room row");
                None
            }
        })
        .collect())
}

fn role_name(role: Option<Role>) -> String {
    role.map(|r| r.to_string())
        .unwrap_or_else(|| "none".to_string())
}
