//! Domain models and types for Medboard.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`], [`UserId`])
//! - **Roles and identities** ([`Role`], [`Identity`])
//! - **Row models** ([`Patient`], [`Doctor`], [`StaffMember`], [`Room`])
//!   and the validated admission input ([`PatientDraft`])
//! - **Error types** ([`MedboardError`] with [`StoreError`], [`AuthError`],
//!   and [`AdmissionError`] sub-hierarchies)
//! - **Result type alias** ([`Result`])
//!
//! Identifier newtypes keep ids from different collections apart at compile
//! time, and all fallible operations return [`Result<T>`] so `?` composes
//! across layers.

pub mod doctor;
pub mod errors;
pub mod ids;
pub mod patient;
pub mod result;
pub mod role;
pub mod room;
pub mod staff;

// Re-export commonly used types for convenience
pub use doctor::{Doctor, ProfileRef};
pub use errors::{AdmissionError, AuthError, MedboardError, StoreError};
pub use ids::{RecordId, UserId};
pub use patient::{Patient, PatientDraft, PatientStatus};
pub use result::Result;
pub use role::{Identity, Role};
pub use room::Room;
pub use staff::StaffMember;
