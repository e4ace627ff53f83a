//! Protection engine
//!
//! The orchestrator the presentation layer talks to. Every operation gates on
//! the capability table and the consent state, invokes the transform library
//! as needed, and appends audit entries. Audit failures propagate: an action
//! whose entry could not be written reports that failure to its caller.

use crate::adapters::traits::{AuditSink, ConsentStore, RecordStore, UserStore};
use crate::auth::consent::ConsentGate;
use crate::auth::login::Authenticator;
use crate::core::batch::{BatchOutcome, SweepOutcome};
use crate::core::retention::RetentionPolicy;
use crate::crypto::anonymize::{anonymize_name, mask_contact};
use crate::crypto::cipher::FieldCipher;
use crate::crypto::keyring::Keyring;
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::ids::PatientId;
use crate::domain::patient::PatientUpdate;
use crate::domain::user::Actor;
use crate::domain::{CustodiaError, Result};
use crate::policy::capability::{authorize, Capability};
use crate::policy::view::{render_row, DisplayMode, PatientRow};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use std::sync::Arc;

/// One exported patient row, including the creation timestamp
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportRow {
    /// Record id
    pub id: i64,
    /// Representation per the export mode
    pub name: String,
    /// Representation per the export mode
    pub contact: String,
    /// Diagnosis text
    pub diagnosis: String,
    /// Creation timestamp
    pub date_added: DateTime<Utc>,
}

/// Data-protection and access-control engine over the collaborator traits
pub struct ProtectionEngine {
    records: Arc<dyn RecordStore>,
    audit: Arc<dyn AuditSink>,
    auth: Authenticator,
    consent: ConsentGate,
    keyring: Arc<Keyring>,
    cipher: FieldCipher,
    retention: RetentionPolicy,
}

impl ProtectionEngine {
    /// Wires an engine over its collaborators
    pub fn new(
        records: Arc<dyn RecordStore>,
        users: Arc<dyn UserStore>,
        consents: Arc<dyn ConsentStore>,
        audit: Arc<dyn AuditSink>,
        keyring: Arc<Keyring>,
        retention: RetentionPolicy,
    ) -> Self {
        let auth = Authenticator::new(users, audit.clone());
        let consent = ConsentGate::new(consents, audit.clone());
        let cipher = FieldCipher::new(keyring.clone());
        Self {
            records,
            audit,
            auth,
            consent,
            keyring,
            cipher,
            retention,
        }
    }

    /// The shared key holder
    pub fn keyring(&self) -> &Arc<Keyring> {
        &self.keyring
    }

    /// The field cipher bound to the engine's keyring
    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }

    /// The active retention policy
    pub fn retention(&self) -> &RetentionPolicy {
        &self.retention
    }

    /// Authenticates a user; see [`Authenticator::login`]
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Actor> {
        self.auth.login(username, password).await
    }

    /// Records a logout
    pub async fn logout(&self, actor: &Actor) -> Result<()> {
        self.auth.logout(actor).await
    }

    /// Whether the actor has accepted the consent notice
    pub async fn has_consent(&self, actor: &Actor) -> Result<bool> {
        self.consent.has_consent(actor).await
    }

    /// Records a consent acceptance or decline
    pub async fn record_consent(&self, actor: &Actor, accepted: bool) -> Result<()> {
        self.consent.record(actor, accepted, Utc::now()).await
    }

    /// Lists patient rows in the role-appropriate representation
    ///
    /// Admins pick the display mode; doctors always receive anonymized rows
    /// and receptionists a redacted listing. Emits one `view_patients` entry
    /// summarizing the row count.
    pub async fn view_patients(
        &self,
        actor: &Actor,
        mode: DisplayMode,
    ) -> Result<Vec<PatientRow>> {
        authorize(actor.role, Capability::ViewPatients)?;
        if mode == DisplayMode::Decrypted {
            authorize(actor.role, Capability::ViewRawPii)?;
        }
        self.consent.require(actor).await?;

        let rows: Vec<PatientRow> = self
            .records
            .fetch_all()
            .await?
            .iter()
            .map(|record| render_row(record, actor.role, mode, &self.cipher))
            .collect();

        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::ViewPatients,
                format!("viewed {} rows", rows.len()),
            ))
            .await?;
        Ok(rows)
    }

    /// Creates a record with raw fields populated and derived fields empty
    pub async fn add_patient(
        &self,
        actor: &Actor,
        name: &str,
        contact: &str,
        diagnosis: &str,
    ) -> Result<PatientId> {
        authorize(actor.role, Capability::AddPatient)?;
        self.consent.require(actor).await?;

        let (name, contact, diagnosis) = (name.trim(), contact.trim(), diagnosis.trim());
        if name.is_empty() || contact.is_empty() || diagnosis.is_empty() {
            return Err(CustodiaError::Validation(
                "name, contact, and diagnosis are all required".to_string(),
            ));
        }

        let id = self
            .records
            .insert(name, contact, diagnosis, Utc::now())
            .await?;

        // Audit detail carries a derived token, never the plaintext name
        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::AddPatient,
                format!("patient_id={id}, name_token={}", anonymize_name(name)),
            ))
            .await?;
        tracing::info!(patient_id = %id, by = %actor.username, "Patient added");
        Ok(id)
    }

    /// Updates the diagnosis of an existing record
    pub async fn update_diagnosis(
        &self,
        actor: &Actor,
        id: PatientId,
        diagnosis: &str,
    ) -> Result<()> {
        authorize(actor.role, Capability::EditDiagnosis)?;
        self.consent.require(actor).await?;

        if self.records.fetch(id).await?.is_none() {
            return Err(CustodiaError::NotFound(format!("patient {id}")));
        }
        self.records
            .update(
                id,
                PatientUpdate {
                    diagnosis: Some(diagnosis.to_string()),
                    ..Default::default()
                },
            )
            .await?;

        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::UpdatePatient,
                format!("patient_id={id}, field=diagnosis"),
            ))
            .await?;
        Ok(())
    }

    /// Fills the cached anonymized fields of every record
    ///
    /// Archived records are skipped; a failure on one record never aborts the
    /// batch. One `anonymize` entry is written per transformed record.
    pub async fn anonymize_all(&self, actor: &Actor) -> Result<BatchOutcome> {
        authorize(actor.role, Capability::ManageProtection)?;
        self.consent.require(actor).await?;

        let mut outcome = BatchOutcome::new();
        for record in self.records.fetch_all().await? {
            if record.is_archived() {
                outcome.add_skipped();
                continue;
            }
            let update = PatientUpdate {
                anonymized_name: Some(anonymize_name(&record.name)),
                anonymized_contact: Some(mask_contact(&record.contact)),
                ..Default::default()
            };
            match self.records.update(record.id, update).await {
                Ok(()) => {
                    self.audit
                        .append(&AuditEntry::new(
                            actor,
                            AuditAction::Anonymize,
                            format!("patient_id={}", record.id),
                        ))
                        .await?;
                    outcome.add_success();
                }
                Err(e) => {
                    tracing::error!(patient_id = %record.id, error = %e, "Anonymize failed");
                    outcome.add_failure(record.id, e.to_string());
                }
            }
        }
        tracing::info!(
            succeeded = outcome.succeeded,
            failed = outcome.errors.len(),
            "Anonymize batch finished"
        );
        Ok(outcome)
    }

    /// Fills the encrypted fields of every record under the loaded key
    ///
    /// Fails closed with `KeyUnavailable` before touching any record when no
    /// key is loaded. One `encrypt` entry is written per transformed record.
    pub async fn encrypt_all(&self, actor: &Actor) -> Result<BatchOutcome> {
        authorize(actor.role, Capability::ManageProtection)?;
        self.consent.require(actor).await?;

        if !self.cipher.key_available() {
            return Err(CustodiaError::KeyUnavailable);
        }

        let mut outcome = BatchOutcome::new();
        for record in self.records.fetch_all().await? {
            if record.is_archived() {
                outcome.add_skipped();
                continue;
            }
            let result = self
                .cipher
                .encrypt(&record.name)
                .and_then(|encrypted_name| {
                    self.cipher
                        .encrypt(&record.contact)
                        .map(|encrypted_contact| PatientUpdate {
                            encrypted_name: Some(encrypted_name),
                            encrypted_contact: Some(encrypted_contact),
                            ..Default::default()
                        })
                });
            let update = match result {
                Ok(update) => update,
                Err(e) => {
                    outcome.add_failure(record.id, e.to_string());
                    continue;
                }
            };
            match self.records.update(record.id, update).await {
                Ok(()) => {
                    self.audit
                        .append(&AuditEntry::new(
                            actor,
                            AuditAction::Encrypt,
                            format!("patient_id={}", record.id),
                        ))
                        .await?;
                    outcome.add_success();
                }
                Err(e) => {
                    tracing::error!(patient_id = %record.id, error = %e, "Encrypt failed");
                    outcome.add_failure(record.id, e.to_string());
                }
            }
        }
        tracing::info!(
            succeeded = outcome.succeeded,
            failed = outcome.errors.len(),
            "Encrypt batch finished"
        );
        Ok(outcome)
    }

    /// Exports patient rows in the requested representation
    ///
    /// Emits one `export_patients` entry with the row count.
    pub async fn export_patients(
        &self,
        actor: &Actor,
        mode: DisplayMode,
    ) -> Result<Vec<ExportRow>> {
        authorize(actor.role, Capability::ExportPatients)?;
        if mode == DisplayMode::Decrypted {
            authorize(actor.role, Capability::ViewRawPii)?;
        }
        self.consent.require(actor).await?;

        let rows: Vec<ExportRow> = self
            .records
            .fetch_all()
            .await?
            .iter()
            .map(|record| {
                let row = render_row(record, actor.role, mode, &self.cipher);
                ExportRow {
                    id: row.id,
                    name: row.name,
                    contact: row.contact,
                    diagnosis: row.diagnosis,
                    date_added: record.date_added,
                }
            })
            .collect();

        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::ExportPatients,
                format!("exported {} rows", rows.len()),
            ))
            .await?;
        Ok(rows)
    }

    /// Records that the audit log itself was exported
    ///
    /// Reading the log is a collaborator query surface; this only gates and
    /// attributes the action.
    pub async fn record_log_export(&self, actor: &Actor, exported: usize) -> Result<()> {
        authorize(actor.role, Capability::ExportLogs)?;
        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::ExportLogs,
                format!("exported {exported} logs"),
            ))
            .await
    }

    /// Runs the retention sweep over all records
    pub async fn run_retention_sweep(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<SweepOutcome> {
        authorize(actor.role, Capability::ManageRetention)?;
        self.consent.require(actor).await?;
        self.retention
            .sweep(&self.records, &self.audit, actor, now)
            .await
    }
}
