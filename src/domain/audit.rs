//! Audit trail vocabulary and entry model
//!
//! Entries are immutable once written and carry the actor's role as it was at
//! write time. The denormalization is deliberate: an entry must stay
//! meaningful even if the user's role later changes, so it is never looked up
//! again.

use crate::domain::ids::UserId;
use crate::domain::user::{Actor, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Security-relevant action vocabulary
///
/// The string forms are a stable contract for any log consumer and must not
/// change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Successful or failed login attempt
    Login,
    /// Explicit logout
    Logout,
    /// Consent notice accepted
    ConsentGiven,
    /// Consent notice declined
    ConsentDeclined,
    /// A record listing was served
    ViewPatients,
    /// A record was created
    AddPatient,
    /// A record field was updated
    UpdatePatient,
    /// One record's derived anonymized fields were written
    Anonymize,
    /// One record's encrypted fields were written
    Encrypt,
    /// The audit log itself was exported
    ExportLogs,
    /// Patient rows were exported
    ExportPatients,
    /// The retention cleanup fired for one record
    DataRetention,
}

impl AuditAction {
    /// Stable wire string for this action
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::ConsentGiven => "consent_given",
            AuditAction::ConsentDeclined => "consent_declined",
            AuditAction::ViewPatients => "view_patients",
            AuditAction::AddPatient => "add_patient",
            AuditAction::UpdatePatient => "update_patient",
            AuditAction::Anonymize => "anonymize",
            AuditAction::Encrypt => "encrypt",
            AuditAction::ExportLogs => "export_logs",
            AuditAction::ExportPatients => "export_patients",
            AuditAction::DataRetention => "data_retention",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit entry
///
/// There is no update or delete operation anywhere in the crate's contract;
/// the log is append-only by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Acting user's id
    pub actor_id: UserId,
    /// Acting user's name at write time
    pub username: String,
    /// Acting user's role at write time
    pub role: Role,
    /// What happened
    pub action: AuditAction,
    /// When it happened (UTC)
    pub timestamp: DateTime<Utc>,
    /// Free-text detail; must never contain plaintext PII
    pub detail: String,
}

impl AuditEntry {
    /// Builds an entry attributed to `actor`, stamped now
    pub fn new(actor: &Actor, action: AuditAction, detail: impl Into<String>) -> Self {
        Self {
            actor_id: actor.id,
            username: actor.username.clone(),
            role: actor.role,
            action,
            timestamp: Utc::now(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_strings_are_stable() {
        let expected = [
            (AuditAction::Login, "login"),
            (AuditAction::Logout, "logout"),
            (AuditAction::ConsentGiven, "consent_given"),
            (AuditAction::ConsentDeclined, "consent_declined"),
            (AuditAction::ViewPatients, "view_patients"),
            (AuditAction::AddPatient, "add_patient"),
            (AuditAction::UpdatePatient, "update_patient"),
            (AuditAction::Anonymize, "anonymize"),
            (AuditAction::Encrypt, "encrypt"),
            (AuditAction::ExportLogs, "export_logs"),
            (AuditAction::ExportPatients, "export_patients"),
            (AuditAction::DataRetention, "data_retention"),
        ];
        for (action, s) in expected {
            assert_eq!(action.as_str(), s);
            assert_eq!(
                serde_json::to_string(&action).unwrap(),
                format!("\"{s}\"")
            );
        }
    }

    #[test]
    fn test_entry_denormalizes_role_at_write_time() {
        let actor = Actor {
            id: UserId::new(9).unwrap(),
            username: "admin".to_string(),
            role: Role::Admin,
        };
        let entry = AuditEntry::new(&actor, AuditAction::ViewPatients, "viewed 3 rows");
        assert_eq!(entry.role, Role::Admin);
        assert_eq!(entry.username, "admin");
        assert_eq!(entry.detail, "viewed 3 rows");
    }
}
