//! Role capability table
//!
//! The whole access matrix lives in one match so it can be reviewed as a
//! single artifact instead of being scattered across conditionals.
//!
//! Receptionists do appear under `ViewPatients`: their listing is served, but
//! always in redacted form (id and diagnosis only), see
//! [`Representation::resolve`](crate::policy::view::Representation::resolve).
//! What they lack is the PII read path itself, `ViewRawPii` and the
//! anonymized representations.

use crate::domain::user::Role;
use crate::domain::{CustodiaError, Result};
use serde::{Deserialize, Serialize};

/// Actions a role may or may not perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// List patient records (representation still depends on role)
    ViewPatients,
    /// See decrypted/raw PII via the admin display toggle
    ViewRawPii,
    /// Create a new patient record
    AddPatient,
    /// Edit the diagnosis of an existing record
    EditDiagnosis,
    /// Run anonymize-all / encrypt-all and manage the encryption key
    ManageProtection,
    /// Run the retention sweep
    ManageRetention,
    /// Read the audit log
    ViewAuditLog,
    /// Export patient rows
    ExportPatients,
    /// Export the audit log
    ExportLogs,
}

/// Whether `role` holds `capability`
pub fn allows(role: Role, capability: Capability) -> bool {
    use Capability::*;
    match (role, capability) {
        (Role::Admin, _) => true,

        (Role::Doctor, ViewPatients) => true,
        (Role::Doctor, _) => false,

        (Role::Receptionist, ViewPatients) => true,
        (Role::Receptionist, AddPatient) => true,
        (Role::Receptionist, EditDiagnosis) => true,
        (Role::Receptionist, _) => false,
    }
}

/// Fails with a `Forbidden` error unless `role` holds `capability`
///
/// The error is distinct from "not found" and from an empty result, so a
/// denied action can never be mistaken for "no data".
pub fn authorize(role: Role, capability: Capability) -> Result<()> {
    if allows(role, capability) {
        Ok(())
    } else {
        Err(CustodiaError::Forbidden { role, capability })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Role::Admin, Capability::ViewRawPii, true)]
    #[test_case(Role::Admin, Capability::ManageRetention, true)]
    #[test_case(Role::Admin, Capability::ViewAuditLog, true)]
    #[test_case(Role::Doctor, Capability::ViewPatients, true)]
    #[test_case(Role::Doctor, Capability::ViewRawPii, false)]
    #[test_case(Role::Doctor, Capability::AddPatient, false)]
    #[test_case(Role::Doctor, Capability::ViewAuditLog, false)]
    #[test_case(Role::Receptionist, Capability::AddPatient, true)]
    #[test_case(Role::Receptionist, Capability::EditDiagnosis, true)]
    #[test_case(Role::Receptionist, Capability::ViewRawPii, false)]
    #[test_case(Role::Receptionist, Capability::ManageProtection, false)]
    #[test_case(Role::Receptionist, Capability::ExportPatients, false)]
    fn test_capability_table(role: Role, capability: Capability, expected: bool) {
        assert_eq!(allows(role, capability), expected);
    }

    #[test]
    fn test_authorize_produces_forbidden() {
        let err = authorize(Role::Doctor, Capability::ManageRetention).unwrap_err();
        assert!(matches!(err, CustodiaError::Forbidden { .. }));
    }

    #[test]
    fn test_admin_holds_every_capability() {
        for capability in [
            Capability::ViewPatients,
            Capability::ViewRawPii,
            Capability::AddPatient,
            Capability::EditDiagnosis,
            Capability::ManageProtection,
            Capability::ManageRetention,
            Capability::ViewAuditLog,
            Capability::ExportPatients,
            Capability::ExportLogs,
        ] {
            assert!(allows(Role::Admin, capability));
        }
    }
}
