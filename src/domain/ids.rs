//! Domain identifier types with validation
//!
//! Newtype wrappers for backend identifiers. Row ids in the hosted store are
//! UUIDs; user ids come from the identity provider and are opaque strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Row identifier newtype wrapper
///
/// Represents the primary key of a stored row (patients, rooms, bills, ...).
/// The hosted backend issues UUIDs, and the format is validated on
/// construction so malformed ids are rejected before they reach a filter.
///
/// # Examples
///
/// ```
/// use medboard::domain::ids::RecordId;
/// use std::str::FromStr;
///
/// let id = RecordId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(id.as_str(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid UUID.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if Uuid::parse_str(&id).is_err() {
            return Err(format!("Invalid record id (expected UUID): {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier newtype wrapper
///
/// Identifies the authenticated user behind the ambient session. Opaque to
/// this crate beyond being non-empty; the identity provider owns its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or all whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
