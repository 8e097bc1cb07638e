//! Staff directory records

use crate::domain::doctor::ProfileRef;
use crate::domain::ids::RecordId;
use serde::Deserialize;

/// Staff row as read from the store
///
/// `role` here is the job title (nurse, technician, ...), not the
/// application [`Role`](crate::domain::Role) used for authorization.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffMember {
    pub id: RecordId,
    pub employee_id: String,
    pub department: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub shift: Option<String>,
    pub joined_date: String,
    #[serde(default, rename = "profiles")]
    pub profile: Option<ProfileRef>,
}

impl StaffMember {
    /// Display name from the embedded profile, when present
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.full_name.as_str())
            .unwrap_or("(unlisted)")
    }
}
