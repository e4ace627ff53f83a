//! Domain identifier types
//!
//! Newtype wrappers for record and user identifiers so the two cannot be
//! mixed up at call sites. Identifiers are opaque positive integers assigned
//! by the record store and immutable once created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Patient record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i64);

impl PatientId {
    /// Creates a new PatientId
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not positive
    pub fn new(id: i64) -> Result<Self, String> {
        if id <= 0 {
            return Err(format!("Patient id must be positive, got {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the raw numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User (actor) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new UserId
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not positive
    pub fn new(id: i64) -> Result<Self, String> {
        if id <= 0 {
            return Err(format!("User id must be positive, got {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the raw numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_creation() {
        let id = PatientId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn test_patient_id_rejects_non_positive() {
        assert!(PatientId::new(0).is_err());
        assert!(PatientId::new(-3).is_err());
    }

    #[test]
    fn test_user_id_creation() {
        let id = UserId::new(1).unwrap();
        assert_eq!(id.value(), 1);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = PatientId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: PatientId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
