//! Room records
//!
//! Invariant: a room is occupied iff exactly one active patient references
//! it. Admission marks a room occupied; reclaiming occupancy on discharge
//! belongs to the backend's discharge flow, not this crate.

use crate::domain::ids::RecordId;
use serde::Deserialize;

/// Room row as read from the store
#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    pub id: RecordId,
    pub room_number: String,
    pub room_type: String,
    #[serde(default)]
    pub floor: Option<i32>,
    pub is_occupied: bool,
}
