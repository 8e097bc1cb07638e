//! Doctor directory records
//!
//! Read-mostly rows; the display name lives in the embedded `profiles`
//! resource, which a select may or may not include.

use crate::domain::ids::RecordId;
use serde::Deserialize;

/// Embedded profile resource as returned by `profiles(full_name)` selects
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRef {
    pub full_name: String,
}

/// Doctor row as read from the store
#[derive(Debug, Clone, Deserialize)]
pub struct Doctor {
    pub id: RecordId,
    pub specialization: String,
    pub department: String,
    pub qualification: String,
    pub experience_years: u32,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub patient_count: u32,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default, rename = "profiles")]
    pub profile: Option<ProfileRef>,
}

impl Doctor {
    /// Display name from the embedded profile, when present
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.full_name.as_str())
            .unwrap_or("(unlisted)")
    }
}
