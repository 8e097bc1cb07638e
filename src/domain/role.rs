//! Roles and identities
//!
//! The role enumeration is fixed by the backend's `app_role` type and governs
//! every authorization decision in the access layer. A role is issued once
//! per session and never changes while the session lives.

use crate::domain::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access, including staff directory and admin panel
    Admin,
    /// Medical staff with clinical write access
    Doctor,
    /// Support staff with clinical write access
    Staff,
    /// Self-service portal access only
    Patient,
}

impl Role {
    /// Returns the role's wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Staff => "staff",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "staff" => Ok(Role::Staff),
            "patient" => Ok(Role::Patient),
            other => Err(format!(
                "Unknown role: '{other}'. Must be one of: admin, doctor, staff, patient"
            )),
        }
    }
}

/// The authenticated identity acting on the system
///
/// This is the single source of truth for "who is acting now". It is passed
/// explicitly into every resolver and capability check rather than read from
/// ambient state, so the access layer stays testable without a live session.
///
/// `role` is `None` when the user has no row in the role collection; the
/// access layer treats that as the least-privileged case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Identity-provider user id
    pub user_id: UserId,
    /// Role issued for this session, if any
    pub role: Option<Role>,
}

impl Identity {
    /// Creates an identity with the given role
    pub fn new(user_id: UserId, role: Option<Role>) -> Self {
        Self { user_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Admin, Role::Doctor, Role::Staff, Role::Patient] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_is_case_insensitive() {
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str(" DOCTOR ").unwrap(), Role::Doctor);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"patient\"").unwrap();
        assert_eq!(role, Role::Patient);
    }
}
