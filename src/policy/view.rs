//! Role-scoped rendering of patient rows
//!
//! For a (role, display-mode) pair this module picks which representation of
//! `name`/`contact` a caller receives. Doctors always get the anonymized
//! form, freshly computed when no cached derived value exists; receptionists
//! get a redacted listing with no PII in any form; admins choose between
//! anonymized and decrypted via an explicit toggle.
//!
//! Decrypt failures are never fatal here: the row falls back to the raw
//! stored value, or to an explicit marker when there is nothing to show.

use crate::crypto::anonymize::{anonymize_name, mask_contact};
use crate::crypto::cipher::FieldCipher;
use crate::domain::patient::PatientRecord;
use crate::domain::user::Role;
use serde::{Deserialize, Serialize};

/// Shown when decryption fails and no raw value survives
pub const CANNOT_DECRYPT_MARKER: &str = "[cannot decrypt]";

/// Shown in decrypted mode for fields that were never encrypted and have no raw value
pub const NOT_ENCRYPTED_MARKER: &str = "(not encrypted)";

/// Shown in place of PII on the receptionist listing
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Admin display toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Anonymized/masked representations (the default)
    #[default]
    Anonymized,
    /// Decrypted PII, admin only
    Decrypted,
}

/// Which representation a role actually receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Decrypt-or-fallback PII
    Decrypted,
    /// Cached or freshly computed anonymized/masked values
    Anonymized,
    /// Id and diagnosis only
    Redacted,
}

impl Representation {
    /// Resolves the representation for a role and requested mode
    ///
    /// Non-admin roles never reach `Decrypted` regardless of the requested
    /// mode; the engine additionally rejects such requests up front, this is
    /// the backstop.
    pub fn resolve(role: Role, mode: DisplayMode) -> Self {
        match role {
            Role::Admin => match mode {
                DisplayMode::Decrypted => Representation::Decrypted,
                DisplayMode::Anonymized => Representation::Anonymized,
            },
            Role::Doctor => Representation::Anonymized,
            Role::Receptionist => Representation::Redacted,
        }
    }
}

/// One rendered patient row, safe to hand to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRow {
    /// Record id
    pub id: i64,
    /// Role-appropriate representation of the name
    pub name: String,
    /// Role-appropriate representation of the contact
    pub contact: String,
    /// Diagnosis, visible to every role that sees the listing
    pub diagnosis: String,
}

/// Renders one record for a role and display mode
pub fn render_row(
    record: &PatientRecord,
    role: Role,
    mode: DisplayMode,
    cipher: &FieldCipher,
) -> PatientRow {
    let (name, contact) = match Representation::resolve(role, mode) {
        Representation::Decrypted => (
            decrypt_or_fallback(record.encrypted_name.as_deref(), &record.name, cipher, record),
            decrypt_or_fallback(
                record.encrypted_contact.as_deref(),
                &record.contact,
                cipher,
                record,
            ),
        ),
        Representation::Anonymized => (
            cached_or(record.anonymized_name.as_deref(), || {
                anonymize_name(&record.name)
            }),
            cached_or(record.anonymized_contact.as_deref(), || {
                mask_contact(&record.contact)
            }),
        ),
        Representation::Redacted => (REDACTED_MARKER.to_string(), REDACTED_MARKER.to_string()),
    };

    PatientRow {
        id: record.id.value(),
        name,
        contact,
        diagnosis: record.diagnosis.clone(),
    }
}

/// Uses the cached derived value unless it is absent or empty
fn cached_or(cached: Option<&str>, compute: impl FnOnce() -> String) -> String {
    match cached {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => compute(),
    }
}

/// Decrypts when possible, otherwise falls back to the raw value or a marker
fn decrypt_or_fallback(
    encrypted: Option<&str>,
    raw: &str,
    cipher: &FieldCipher,
    record: &PatientRecord,
) -> String {
    match encrypted {
        Some(ciphertext) if !ciphertext.is_empty() => match cipher.decrypt(ciphertext) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::warn!(patient_id = %record.id, error = %e, "Decryption failed, falling back");
                if raw.is_empty() {
                    CANNOT_DECRYPT_MARKER.to_string()
                } else {
                    raw.to_string()
                }
            }
        },
        _ => {
            if raw.is_empty() {
                NOT_ENCRYPTED_MARKER.to_string()
            } else {
                raw.to_string()
            }
        }
    }
}
