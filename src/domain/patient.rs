//! Patient records
//!
//! Two shapes live here: [`Patient`], the read model decoded from store rows
//! (optionally carrying the embedded room resource), and [`PatientDraft`],
//! the raw admission-form input. The draft holds text exactly as entered
//! (age as text, comma-separated medication lists) and is validated
//! field-by-field before any write is attempted.

use crate::domain::errors::MedboardError;
use crate::domain::ids::RecordId;
use crate::domain::Result;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Clinical status of an admitted patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Stable,
    Critical,
    Recovering,
    Discharged,
}

impl PatientStatus {
    /// Returns the status's wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Stable => "stable",
            PatientStatus::Critical => "critical",
            PatientStatus::Recovering => "recovering",
            PatientStatus::Discharged => "discharged",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stable" => Ok(PatientStatus::Stable),
            "critical" => Ok(PatientStatus::Critical),
            "recovering" => Ok(PatientStatus::Recovering),
            "discharged" => Ok(PatientStatus::Discharged),
            other => Err(format!(
                "Unknown patient status: '{other}'. Must be one of: stable, critical, recovering, discharged"
            )),
        }
    }
}

/// Embedded room resource as returned by `rooms(room_number)` selects
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRef {
    pub room_number: String,
}

/// Patient row as read from the store
#[derive(Debug, Clone, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    pub patient_id: String,
    pub full_name: String,
    pub age: u16,
    pub gender: String,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub department: String,
    pub condition: String,
    pub status: PatientStatus,
    pub admission_date: String,
    #[serde(default)]
    pub room_id: Option<RecordId>,
    #[serde(default, rename = "rooms")]
    pub room: Option<RoomRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub medications: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub allergies: Vec<String>,
}

impl Patient {
    /// Room number from the embedded resource, if the patient has a room
    pub fn room_number(&self) -> Option<&str> {
        self.room.as_ref().map(|r| r.room_number.as_str())
    }
}

// The store sends `null` for empty array columns.
fn nullable_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Admission-form input, exactly as entered
///
/// Free-text fields are kept raw so validation can point at the offending
/// field; `medications` and `allergies` are comma-separated lists.
#[derive(Debug, Clone, Default)]
pub struct PatientDraft {
    pub patient_id: String,
    pub full_name: String,
    pub age: String,
    pub gender: String,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub department: String,
    pub condition: String,
    pub status: PatientStatus,
    pub room_id: Option<RecordId>,
    pub medications: String,
    pub allergies: String,
}

impl PatientDraft {
    /// Validates the draft, reporting the first offending field
    ///
    /// # Errors
    ///
    /// Returns [`MedboardError::InvalidField`] naming the field and what is
    /// wrong with it. The admission flow never reaches the store with a
    /// draft that fails here.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("patient_id", &self.patient_id),
            ("full_name", &self.full_name),
            ("gender", &self.gender),
            ("department", &self.department),
            ("condition", &self.condition),
        ] {
            if value.trim().is_empty() {
                return Err(MedboardError::InvalidField {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        self.parsed_age()?;

        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err(MedboardError::InvalidField {
                field: "email".to_string(),
                message: format!("'{}' is not an email address", self.email),
            });
        }

        Ok(())
    }

    /// Parses the age field
    pub fn parsed_age(&self) -> Result<u16> {
        let age: u16 = self.age.trim().parse().map_err(|_| MedboardError::InvalidField {
            field: "age".to_string(),
            message: format!("'{}' is not a number", self.age),
        })?;
        if age > 130 {
            return Err(MedboardError::InvalidField {
                field: "age".to_string(),
                message: format!("{age} is out of range"),
            });
        }
        Ok(age)
    }

    /// Builds the insert payload for the store
    ///
    /// Validates first, then normalizes: age becomes a number, the
    /// comma-separated lists become arrays, empty optional fields become
    /// nulls, and the admission timestamp is stamped.
    pub fn into_row(self) -> Result<Value> {
        self.validate()?;
        let age = self.parsed_age()?;

        Ok(json!({
            "patient_id": self.patient_id.trim(),
            "full_name": self.full_name.trim(),
            "age": age,
            "gender": self.gender.trim(),
            "blood_type": optional(&self.blood_type),
            "phone": optional(&self.phone),
            "email": optional(&self.email),
            "address": optional(&self.address),
            "emergency_contact": optional(&self.emergency_contact),
            "emergency_phone": optional(&self.emergency_phone),
            "department": self.department.trim(),
            "condition": self.condition.trim(),
            "status": self.status.as_str(),
            "admission_date": Utc::now().to_rfc3339(),
            "room_id": self.room_id.as_ref().map(|id| id.as_str()),
            "medications": parse_list(&self.medications),
            "allergies": parse_list(&self.allergies),
        }))
    }
}

fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Splits a comma-separated list, trimming entries and dropping empties
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PatientDraft {
        PatientDraft {
            patient_id: "P001".to_string(),
            full_name: "John Doe".to_string(),
            age: "45".to_string(),
            gender: "Male".to_string(),
            department: "Cardiology".to_string(),
            condition: "Hypertension".to_string(),
            medications: "Lisinopril, Aspirin".to_string(),
            allergies: "Penicillin".to_string(),
            ..PatientDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_non_numeric_age_is_a_field_error() {
        let mut d = draft();
        d.age = "forty-five".to_string();
        match d.validate() {
            Err(MedboardError::InvalidField { field, .. }) => assert_eq!(field, "age"),
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[test]
    fn test_age_out_of_range_is_rejected() {
        let mut d = draft();
        d.age = "200".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let mut d = draft();
        d.department = "  ".to_string();
        match d.validate() {
            Err(MedboardError::InvalidField { field, .. }) => assert_eq!(field, "department"),
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_email_is_rejected_but_empty_is_fine() {
        let mut d = draft();
        d.email = "not-an-email".to_string();
        assert!(d.validate().is_err());

        d.email = String::new();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_into_row_normalizes_the_payload() {
        let row = draft().into_row().unwrap();
        assert_eq!(row["age"], 45);
        assert_eq!(row["status"], "stable");
        assert_eq!(
            row["medications"],
            serde_json::json!(["Lisinopril", "Aspirin"])
        );
        assert_eq!(row["allergies"], serde_json::json!(["Penicillin"]));
        assert!(row["room_id"].is_null());
        assert!(row["blood_type"].is_null());
        assert!(row["admission_date"].is_string());
    }

    #[test]
    fn test_into_row_carries_the_selected_room() {
        let mut d = draft();
        d.room_id = Some(RecordId::new("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap());
        let row = d.into_row().unwrap();
        assert_eq!(row["room_id"], "7d44b88c-4199-4bad-97dc-d78268e01398");
    }

    #[test]
    fn test_into_row_refuses_invalid_input() {
        let mut d = draft();
        d.full_name = String::new();
        assert!(d.into_row().is_err());
    }

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        assert_eq!(parse_list("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            PatientStatus::Stable,
            PatientStatus::Critical,
            PatientStatus::Recovering,
            PatientStatus::Discharged,
        ] {
            assert_eq!(PatientStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(PatientStatus::from_str("deceased").is_err());
    }

    #[test]
    fn test_patient_decodes_with_null_lists_and_embedded_room() {
        let row = serde_json::json!({
            "id": "7d44b88c-4199-4bad-97dc-d78268e01398",
            "patient_id": "P001",
            "full_name": "John Doe",
            "age": 45,
            "gender": "Male",
            "department": "Cardiology",
            "condition": "Hypertension",
            "status": "critical",
            "admission_date": "2025-11-02T08:30:00+00:00",
            "room_id": "84d7c3f5-1f6a-4f87-aa95-5d9c6b8f3a29",
            "rooms": {"room_number": "204B"},
            "medications": null,
            "allergies": ["Penicillin"]
        });
        let patient: Patient = serde_json::from_value(row).unwrap();
        assert_eq!(patient.status, PatientStatus::Critical);
        assert_eq!(patient.room_number(), Some("204B"));
        assert!(patient.medications.is_empty());
        assert_eq!(patient.allergies, vec!["Penicillin"]);
    }
}
