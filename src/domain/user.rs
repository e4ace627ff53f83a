//! User accounts, roles, and the sanitized actor view
//!
//! Roles are a closed enumeration rather than free strings so the access
//! matrix in [`crate::policy`] stays a single auditable artifact.

use crate::domain::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed role hierarchy of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the raw-PII display toggle and audit log
    Admin,
    /// Read-only access to anonymized/masked records
    Doctor,
    /// Data entry only; no PII read path
    Receptionist,
}

impl Role {
    /// Stable lowercase string form, denormalized onto audit entries
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Receptionist => "receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "receptionist" => Ok(Role::Receptionist),
            other => Err(format!(
                "Unknown role '{other}'. Must be one of: admin, doctor, receptionist"
            )),
        }
    }
}

/// A stored user account
///
/// The password is represented only as a one-way hash; the plaintext is never
/// stored after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Numeric user id
    pub id: UserId,

    /// Unique username
    pub username: String,

    /// One-way password hash (empty means the account cannot log in)
    pub password_hash: String,

    /// Fixed role
    pub role: Role,

    /// Whether the consent notice has been accepted
    #[serde(default)]
    pub consent_given: bool,

    /// When consent was accepted, if it was
    #[serde(default)]
    pub consent_date: Option<DateTime<Utc>>,
}

/// Sanitized actor returned by a successful login
///
/// Deliberately excludes the password hash so it can never leak through the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Numeric user id
    pub id: UserId,
    /// Username at login time
    pub username: String,
    /// Role at login time
    pub role: Role,
}

impl Actor {
    /// Builds the sanitized view of a stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Doctor, Role::Receptionist] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("DOCTOR").unwrap(), Role::Doctor);
    }

    #[test]
    fn test_role_parse_unknown_fails() {
        assert!(Role::from_str("nurse").is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let back: Role = serde_json::from_str("\"receptionist\"").unwrap();
        assert_eq!(back, Role::Receptionist);
    }

    #[test]
    fn test_actor_omits_password_hash() {
        let user = User {
            id: UserId::new(3).unwrap(),
            username: "drbob".to_string(),
            password_hash: "deadbeef".to_string(),
            role: Role::Doctor,
            consent_given: true,
            consent_date: Some(Utc::now()),
        };
        let actor = Actor::from_user(&user);
        let json = serde_json::to_string(&actor).unwrap();
        assert!(!json.contains("deadbeef"));
        assert!(json.contains("drbob"));
    }
}
