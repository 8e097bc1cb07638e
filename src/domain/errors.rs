//! Domain error types
//!
//! This module defines the error hierarchy for Medboard. All errors are
//! domain-specific and don't expose third-party types; adapter errors are
//! mapped into [`StoreError`] / [`AuthError`] at the adapter boundary.

use thiserror::Error;

/// Main Medboard error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MedboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data-store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Identity/session errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Admission transaction errors
    #[error("Admission error: {0}")]
    Admission(#[from] AdmissionError),

    /// General validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-level validation errors, surfaced before any write is attempted
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    /// An action refused client-side because the acting role lacks the capability
    #[error("Permission denied: role '{role}' may not {action}")]
    PermissionDenied { role: String, action: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Data-store errors
///
/// Errors that occur when talking to the hosted REST backend. These never
/// expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store at all
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// The store rejected the ambient credentials (401/403)
    #[error("Store rejected credentials: {0}")]
    Unauthorized(String),

    /// A select/count request failed
    #[error("Query failed: {status} - {message}")]
    QueryFailed { status: u16, message: String },

    /// An insert was rejected
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    /// An update was rejected
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// A delete was rejected
    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// The store answered with a body we could not interpret
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Identity/session errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No active session
    #[error("No active session; sign in first")]
    NotSignedIn,

    /// The session token was rejected
    #[error("Session rejected: {0}")]
    SessionRejected(String),

    /// The user exists but the role lookup failed
    #[error("Role lookup failed: {0}")]
    RoleLookupFailed(String),

    /// Sign-out did not complete
    #[error("Sign-out failed: {0}")]
    SignOutFailed(String),
}

/// Admission transaction errors
///
/// The admit flow is two dependent writes with no store-side transaction;
/// these variants make the partial-failure outcomes explicit so callers can
/// never mistake an inconsistent admission for a clean failure.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The selected room is already occupied
    #[error("Room {room_id} is already occupied")]
    RoomOccupied { room_id: String },

    /// The selected room does not exist
    #[error("Room {room_id} not found")]
    RoomNotFound { room_id: String },

    /// The patient row was inserted but the room occupancy update failed.
    ///
    /// `rolled_back` reports whether the compensating delete of the patient
    /// record succeeded. When it is `false` the store holds a patient
    /// referencing a room still marked unoccupied and the record needs
    /// manual reconciliation.
    #[error("Patient {patient_id} admitted but room {room_id} could not be marked occupied: {reason} (patient record rolled back: {rolled_back})")]
    RoomAssignmentFailed {
        patient_id: String,
        room_id: String,
        reason: String,
        rolled_back: bool,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedboardError {
    fn from(err: std::io::Error) -> Self {
        MedboardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedboardError {
    fn from(err: serde_json::Error) -> Self {
        MedboardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedboardError {
    fn from(err: toml::de::Error) -> Self {
        MedboardError::Configuration(format!("TOML parse error: {err}"))
    }
}
