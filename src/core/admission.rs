//! Patient admission transaction
//!
//! Admitting a patient into a room is two dependent writes against a store
//! with no multi-statement transaction: insert the patient, then mark the
//! room occupied. The gap between them is the one consistency risk in this
//! application, so the failure handling is explicit: a failed occupancy
//! update triggers a compensating delete of the inserted patient, and the
//! outcome (rolled back or needing manual reconciliation) always surfaces
//! to the caller. A partial admission is never reported as success.

use crate::access::{can_perform, Capability};
use crate::adapters::store::{DataStore, Filter, SelectQuery};
use crate::domain::errors::{AdmissionError, MedboardError, StoreError};
use crate::domain::{PatientDraft, Result, Role, Room};
use serde_json::{json, Value};

/// Admit a patient, optionally into a room
///
/// Sequence:
/// 1. Capability check: refused before any store call unless the role may
///    create patient records.
/// 2. Draft validation: field-level errors surface here and the store is
///    never reached with invalid input.
/// 3. If a room is selected, it must exist and be unoccupied.
/// 4. Insert the patient row.
/// 5. Mark the room occupied, rolling back the insert on failure.
///
/// With `dry_run` set, steps 4 and 5 are logged and skipped.
///
/// Returns the inserted patient row (or the validated payload in a dry
/// run).
///
/// # Errors
///
/// Returns [`MedboardError::PermissionDenied`] for unprivileged roles,
/// [`MedboardError::InvalidField`] for invalid drafts,
/// [`AdmissionError::RoomOccupied`]/[`AdmissionError::RoomNotFound`] for a
/// bad room selection, and
/// [`AdmissionError::RoomAssignmentFailed`] when the occupancy update
/// fails after the insert; its `rolled_back` flag reports whether the
/// compensating delete succeeded.
pub async fn admit_patient(
    store: &dyn DataStore,
    role: Option<Role>,
    draft: PatientDraft,
    dry_run: bool,
) -> Result<Value> {
    if !can_perform(role, Capability::CreatePatient) {
        return Err(MedboardError::PermissionDenied {
            role: role
                .map(|r| r.to_string())
                .unwrap_or_else(|| "none".to_string()),
            action: Capability::CreatePatient.describe().to_string(),
        });
    }

    let room_id = draft.room_id.clone();
    let row = draft.into_row()?;

    if let Some(room_id) = &room_id {
        let query = SelectQuery::new()
            .filter(Filter::eq("id", room_id.as_str()))
            .limit(1);
        let rooms = store.select("rooms", &query).await?;
        let Some(room) = rooms.into_iter().next() else {
            return Err(AdmissionError::RoomNotFound {
                room_id: room_id.to_string(),
            }
            .into());
        };
        let room: Room = serde_json::from_value(room)?;
        if room.is_occupied {
            return Err(AdmissionError::RoomOccupied {
                room_id: room_id.to_string(),
            }
            .into());
        }
    }

    if dry_run {
        tracing::info!(
            patient_id = %field(&row, "patient_id"),
            room_id = ?room_id,
            "Dry run: skipping patient insert and room update"
        );
        return Ok(row);
    }

    let inserted = store.insert("patients", vec![row]).await?;
    let patient = inserted.into_iter().next().ok_or_else(|| {
        MedboardError::Store(StoreError::InvalidResponse(
            "insert returned no rows".to_string(),
        ))
    })?;

    let Some(room_id) = room_id else {
        tracing::info!(patient_id = %field(&patient, "patient_id"), "Patient admitted");
        return Ok(patient);
    };

    let occupancy = store
        .update(
            "rooms",
            json!({"is_occupied": true}),
            &[Filter::eq("id", room_id.as_str())],
        )
        .await;

    // An update that matched no rows means the room vanished between the
    // check and the write; treat it like a rejected update.
    let failure = match occupancy {
        Ok(updated) if updated > 0 => None,
        Ok(_) => Some("room update affected no rows".to_string()),
        Err(e) => Some(e.to_string()),
    };

    let Some(reason) = failure else {
        tracing::info!(
            patient_id = %field(&patient, "patient_id"),
            room_id = %room_id,
            "Patient admitted into room"
        );
        return Ok(patient);
    };

    let patient_key = field(&patient, "id");
    tracing::warn!(
        patient_id = %patient_key,
        room_id = %room_id,
        reason = %reason,
        "Room occupancy update failed, attempting to roll back the insert"
    );

    let rolled_back = roll_back(store, &patient_key).await;

    Err(AdmissionError::RoomAssignmentFailed {
        patient_id: patient_key,
        room_id: room_id.to_string(),
        reason,
        rolled_back,
    }
    .into())
}

/// Compensating delete of the inserted patient; best effort
async fn roll_back(store: &dyn DataStore, patient_key: &str) -> bool {
    match store
        .delete("patients", &[Filter::eq("id", patient_key)])
        .await
    {
        Ok(removed) if removed > 0 => {
            tracing::info!(patient_id = %patient_key, "Rolled back patient insert");
            true
        }
        Ok(_) => {
            tracing::warn!(patient_id = %patient_key, "Compensating delete matched no rows");
            false
        }
        Err(e) => {
            tracing::warn!(
                patient_id = %patient_key,
                error = %e,
                "Compensating delete failed; record needs manual reconciliation"
            );
            false
        }
    }
}

fn field(row: &Value, name: &str) -> String {
    row.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
