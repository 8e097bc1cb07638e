//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod dashboard;
pub mod doctors;
pub mod init;
pub mod logout;
pub mod patients;
pub mod staff;
pub mod validate;
pub mod whoami;

use crate::domain::errors::{AdmissionError, MedboardError, StoreError};

/// Map a command failure to the process exit code
///
/// 0 success, 2 configuration or input error, 3 permission/session refused,
/// 4 connection error, 5 fatal.
pub(crate) fn exit_code_for(error: &MedboardError) -> i32 {
    match error {
        MedboardError::Configuration(_)
        | MedboardError::Validation(_)
        | MedboardError::InvalidField { .. }
        | MedboardError::Admission(AdmissionError::RoomOccupied { .. })
        | MedboardError::Admission(AdmissionError::RoomNotFound { .. }) => 2,
        MedboardError::PermissionDenied { .. } | MedboardError::Auth(_) => 3,
        MedboardError::Store(StoreError::ConnectionFailed(_))
        | MedboardError::Store(StoreError::Timeout(_)) => 4,
        _ => 5,
    }
}
