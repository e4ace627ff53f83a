//! Patient record model
//!
//! A record carries the raw sensitive fields (`name`, `contact`), the derived
//! protected representations (anonymized / encrypted, each independently
//! nullable and cached rather than recomputed per read), a non-sensitive
//! diagnosis, and the creation timestamp that drives retention.
//!
//! Once the retention cleanup has fired, the raw fields hold the archived
//! sentinel and the original values are unrecoverable. The derived fields are
//! overwritten with their own sentinels at the same time and must not be
//! trusted as representing the original data afterwards.

use crate::domain::ids::PatientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel written into `name`/`contact` by the retention cleanup
pub const ARCHIVED_SENTINEL: &str = "REDACTED_ARCHIVED";

/// Sentinel written into `anonymized_name` by the retention cleanup
pub const ARCHIVED_ANON_NAME: &str = "ANON_ARCHIVED";

/// Sentinel written into `anonymized_contact` by the retention cleanup
pub const ARCHIVED_ANON_CONTACT: &str = "XXX-XXX-XXXX";

/// A stored patient record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Opaque numeric identifier, immutable once created
    pub id: PatientId,

    /// Raw patient name (sensitive)
    pub name: String,

    /// Raw contact number (sensitive)
    pub contact: String,

    /// Free-text diagnosis, visible per role policy
    pub diagnosis: String,

    /// Cached one-way anonymized name, if the anonymize action has run
    #[serde(default)]
    pub anonymized_name: Option<String>,

    /// Cached masked contact, if the anonymize action has run
    #[serde(default)]
    pub anonymized_contact: Option<String>,

    /// Ciphertext of `name` under the key loaded at encryption time
    #[serde(default)]
    pub encrypted_name: Option<String>,

    /// Ciphertext of `contact` under the key loaded at encryption time
    #[serde(default)]
    pub encrypted_contact: Option<String>,

    /// Creation timestamp; drives the retention window
    pub date_added: DateTime<Utc>,
}

impl PatientRecord {
    /// Creates a fresh record with raw fields populated and no derived fields
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        contact: impl Into<String>,
        diagnosis: impl Into<String>,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            contact: contact.into(),
            diagnosis: diagnosis.into(),
            anonymized_name: None,
            anonymized_contact: None,
            encrypted_name: None,
            encrypted_contact: None,
            date_added,
        }
    }

    /// True once the retention cleanup has overwritten the raw fields
    pub fn is_archived(&self) -> bool {
        self.name == ARCHIVED_SENTINEL && self.contact == ARCHIVED_SENTINEL
    }
}

/// Partial field set for record updates
///
/// Only the populated fields are written; the store leaves the rest
/// untouched. Mirrors the update contract of the record store collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUpdate {
    /// Replace the raw name
    pub name: Option<String>,
    /// Replace the raw contact
    pub contact: Option<String>,
    /// Replace the diagnosis text
    pub diagnosis: Option<String>,
    /// Replace the cached anonymized name
    pub anonymized_name: Option<String>,
    /// Replace the cached anonymized contact
    pub anonymized_contact: Option<String>,
    /// Replace the encrypted name
    pub encrypted_name: Option<String>,
    /// Replace the encrypted contact
    pub encrypted_contact: Option<String>,
}

impl PatientUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contact.is_none()
            && self.diagnosis.is_none()
            && self.anonymized_name.is_none()
            && self.anonymized_contact.is_none()
            && self.encrypted_name.is_none()
            && self.encrypted_contact.is_none()
    }

    /// Applies the populated fields to a record in place
    pub fn apply(&self, record: &mut PatientRecord) {
        if let Some(v) = &self.name {
            record.name = v.clone();
        }
        if let Some(v) = &self.contact {
            record.contact = v.clone();
        }
        if let Some(v) = &self.diagnosis {
            record.diagnosis = v.clone();
        }
        if let Some(v) = &self.anonymized_name {
            record.anonymized_name = Some(v.clone());
        }
        if let Some(v) = &self.anonymized_contact {
            record.anonymized_contact = Some(v.clone());
        }
        if let Some(v) = &self.encrypted_name {
            record.encrypted_name = Some(v.clone());
        }
        if let Some(v) = &self.encrypted_contact {
            record.encrypted_contact = Some(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PatientRecord {
        PatientRecord::new(
            PatientId::new(1).unwrap(),
            "John Doe",
            "0300-555-1234",
            "Flu",
            Utc::now(),
        )
    }

    #[test]
    fn test_new_record_has_no_derived_fields() {
        let r = sample();
        assert!(r.anonymized_name.is_none());
        assert!(r.anonymized_contact.is_none());
        assert!(r.encrypted_name.is_none());
        assert!(r.encrypted_contact.is_none());
        assert!(!r.is_archived());
    }

    #[test]
    fn test_is_archived_requires_both_sentinels() {
        let mut r = sample();
        r.name = ARCHIVED_SENTINEL.to_string();
        assert!(!r.is_archived());
        r.contact = ARCHIVED_SENTINEL.to_string();
        assert!(r.is_archived());
    }

    #[test]
    fn test_update_applies_only_populated_fields() {
        let mut r = sample();
        let update = PatientUpdate {
            diagnosis: Some("Recovered".to_string()),
            anonymized_name: Some("ANON_12345678".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        update.apply(&mut r);
        assert_eq!(r.diagnosis, "Recovered");
        assert_eq!(r.anonymized_name.as_deref(), Some("ANON_12345678"));
        assert_eq!(r.name, "John Doe");
        assert_eq!(r.contact, "0300-555-1234");
    }

    #[test]
    fn test_empty_update() {
        assert!(PatientUpdate::default().is_empty());
    }
}
