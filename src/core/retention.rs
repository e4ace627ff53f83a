//! Retention evaluator
//!
//! Defines the retention rule, not its schedule: a cron-like caller decides
//! when the sweep runs. A record strictly older than the retention window is
//! irreversibly anonymized: raw fields are overwritten with the archived
//! sentinel and derived fields with their redacted sentinels. No stored original
//! survives, and already-archived records are excluded from later sweeps.

use crate::adapters::traits::{AuditSink, RecordStore};
use crate::core::batch::SweepOutcome;
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::patient::{
    PatientRecord, PatientUpdate, ARCHIVED_ANON_CONTACT, ARCHIVED_ANON_NAME, ARCHIVED_SENTINEL,
};
use crate::domain::user::Actor;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default retention window in days
pub const DEFAULT_RETENTION_DAYS: i64 = 365;

/// The retention rule and its batch application
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    days: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    /// Creates a policy with a window of `days`
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    /// Window length in days
    pub fn days(&self) -> i64 {
        self.days
    }

    /// True when the record's age strictly exceeds the window
    pub fn is_overdue(&self, record: &PatientRecord, now: DateTime<Utc>) -> bool {
        (now - record.date_added).num_days() > self.days
    }

    /// The destructive field overwrite applied to an overdue record
    ///
    /// Idempotent in effect: reapplying to an already-archived record
    /// produces the same sentinel state.
    pub fn retention_update(&self) -> PatientUpdate {
        PatientUpdate {
            name: Some(ARCHIVED_SENTINEL.to_string()),
            contact: Some(ARCHIVED_SENTINEL.to_string()),
            anonymized_name: Some(ARCHIVED_ANON_NAME.to_string()),
            anonymized_contact: Some(ARCHIVED_ANON_CONTACT.to_string()),
            ..Default::default()
        }
    }

    /// Sweeps all records, archiving the overdue ones
    ///
    /// Each overdue record is processed independently: a storage failure on
    /// one is collected into the outcome and the sweep continues. Exactly one
    /// `data_retention` audit entry is written per archived record.
    pub async fn sweep(
        &self,
        records: &Arc<dyn RecordStore>,
        audit: &Arc<dyn AuditSink>,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<SweepOutcome> {
        let mut outcome = SweepOutcome::default();

        for record in records.fetch_all().await? {
            if record.is_archived() || !self.is_overdue(&record, now) {
                outcome.skipped += 1;
                continue;
            }

            match records.update(record.id, self.retention_update()).await {
                Ok(()) => {
                    audit
                        .append(&AuditEntry::new(
                            actor,
                            AuditAction::DataRetention,
                            format!(
                                "Anonymized patient {} after {} days",
                                record.id, self.days
                            ),
                        ))
                        .await?;
                    outcome.archived += 1;
                    tracing::info!(patient_id = %record.id, "Record archived by retention sweep");
                }
                Err(e) => {
                    tracing::error!(patient_id = %record.id, error = %e, "Retention update failed");
                    outcome.errors.push((record.id, e.to_string()));
                }
            }
        }

        tracing::info!(
            archived = outcome.archived,
            skipped = outcome.skipped,
            failed = outcome.errors.len(),
            "Retention sweep finished"
        );
        Ok(outcome)
    }
}
