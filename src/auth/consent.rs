//! Consent gate
//!
//! Record access requires an accepted consent notice. Acceptance is recorded
//! once with its timestamp; a decline clears the state so the notice can be
//! asked again on the next session.

use crate::adapters::traits::{AuditSink, ConsentStore};
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::user::Actor;
use crate::domain::{CustodiaError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Checks and records consent state for actors
pub struct ConsentGate {
    consents: Arc<dyn ConsentStore>,
    audit: Arc<dyn AuditSink>,
}

impl ConsentGate {
    /// Creates a gate over the given collaborators
    pub fn new(consents: Arc<dyn ConsentStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { consents, audit }
    }

    /// Whether the actor has accepted the consent notice
    pub async fn has_consent(&self, actor: &Actor) -> Result<bool> {
        self.consents.consent(actor.id).await
    }

    /// Fails with `ConsentRequired` unless consent is on record
    pub async fn require(&self, actor: &Actor) -> Result<()> {
        if self.has_consent(actor).await? {
            Ok(())
        } else {
            Err(CustodiaError::ConsentRequired)
        }
    }

    /// Records an acceptance or decline and audits it
    pub async fn record(
        &self,
        actor: &Actor,
        accepted: bool,
        when: DateTime<Utc>,
    ) -> Result<()> {
        self.consents.set_consent(actor.id, accepted, when).await?;
        let (action, detail) = if accepted {
            (AuditAction::ConsentGiven, "User accepted GDPR consent")
        } else {
            (AuditAction::ConsentDeclined, "User declined GDPR consent")
        };
        self.audit
            .append(&AuditEntry::new(actor, action, detail))
            .await?;
        tracing::info!(username = %actor.username, accepted, "Consent recorded");
        Ok(())
    }
}
