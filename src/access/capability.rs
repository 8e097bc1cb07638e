//! Capability checks
//!
//! A capability is a named permission checked against the acting role before
//! a mutating action or a gated page is attempted. This check runs before
//! any store call is issued; the backend's row-level security remains an
//! independent enforcement layer behind it.

use crate::domain::Role;

/// Named permissions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create a patient record (admission)
    CreatePatient,
    /// Update a patient record (status change, discharge)
    UpdatePatient,
    /// Browse and manage the staff directory
    ManageStaff,
    /// Open the administrative panel
    ViewAdminPanel,
}

impl Capability {
    /// Human-readable action phrase, used in refusal messages
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::CreatePatient => "create patient records",
            Capability::UpdatePatient => "update patient records",
            Capability::ManageStaff => "manage the staff directory",
            Capability::ViewAdminPanel => "open the admin panel",
        }
    }
}

/// Returns whether `role` may perform `capability`
///
/// Pure function of its inputs; an absent role (no role row for the user)
/// is the least-privileged case and can perform nothing. Patients never
/// mutate clinical records.
pub fn can_perform(role: Option<Role>, capability: Capability) -> bool {
    let Some(role) = role else {
        return false;
    };

    match capability {
        Capability::CreatePatient | Capability::UpdatePatient => {
            matches!(role, Role::Admin | Role::Doctor | Role::Staff)
        }
        Capability::ManageStaff | Capability::ViewAdminPanel => matches!(role, Role::Admin),
    }
}
