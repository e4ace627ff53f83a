//! Collaborator contracts
//!
//! The engine owns none of the persistence; it talks to these traits. Every
//! read is assumed to return a consistent snapshot and every write is atomic
//! per record. No cross-record transactions are required or assumed.

use crate::domain::audit::AuditEntry;
use crate::domain::ids::{PatientId, UserId};
use crate::domain::patient::{PatientRecord, PatientUpdate};
use crate::domain::user::User;
use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// Patient record persistence
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch all records in insertion order by id
    async fn fetch_all(&self) -> Result<Vec<PatientRecord>>;

    /// Fetch one record by id
    ///
    /// Returns `Ok(None)` when the id is unknown.
    async fn fetch(&self, id: PatientId) -> Result<Option<PatientRecord>>;

    /// Insert a new record with raw fields populated and derived fields empty
    ///
    /// Returns the assigned id.
    async fn insert(
        &self,
        name: &str,
        contact: &str,
        diagnosis: &str,
        date_added: DateTime<Utc>,
    ) -> Result<PatientId>;

    /// Apply a partial field update to an existing record
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    async fn update(&self, id: PatientId, update: PatientUpdate) -> Result<()>;
}

/// Append-only audit trail
///
/// There is deliberately no read, update, or delete operation here; a query
/// surface for dashboards is a collaborator concern outside this contract.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one immutable entry
    ///
    /// Failures propagate to the caller; the trigger action must not pretend
    /// the entry was written.
    async fn append(&self, entry: &AuditEntry) -> Result<()>;
}

/// Encryption key persistence
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Load the persisted key bytes, if any
    async fn load_key(&self) -> Result<Option<Zeroizing<Vec<u8>>>>;

    /// Persist key bytes, replacing any previous key
    async fn save_key(&self, bytes: &[u8]) -> Result<()>;
}

/// Consent state persistence
#[async_trait]
pub trait ConsentStore: Send + Sync {
    /// Whether the user has accepted the consent notice
    async fn consent(&self, user: UserId) -> Result<bool>;

    /// Record an acceptance or decline with its timestamp
    async fn set_consent(&self, user: UserId, accepted: bool, when: DateTime<Utc>) -> Result<()>;
}

/// User account lookup
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by unique username
    ///
    /// Returns `Ok(None)` when the username is unknown.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>>;
}
