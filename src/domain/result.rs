//! Result type alias for Medboard operations

use crate::domain::errors::MedboardError;

/// Convenience alias used by all fallible operations in this crate
pub type Result<T> = std::result::Result<T, MedboardError>;
