//! File-backed collaborators for the operator CLI
//!
//! `JsonRecordStore` keeps records, users, and consent in a single JSON
//! document rewritten on every mutation; fine for the dashboard-sized data
//! sets this tool manages. `JsonAuditSink` appends one JSON object per line
//! and never rewrites earlier lines, keeping the log append-only on disk too.

use crate::adapters::traits::{AuditSink, ConsentStore, RecordStore, UserStore};
use crate::domain::audit::AuditEntry;
use crate::domain::ids::{PatientId, UserId};
use crate::domain::patient::{PatientRecord, PatientUpdate};
use crate::domain::user::User;
use crate::domain::{CustodiaError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// On-disk document shape of the record store
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    next_id: i64,
    patients: Vec<PatientRecord>,
    #[serde(default)]
    users: Vec<User>,
}

/// JSON-document record, user, and consent store
pub struct JsonRecordStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the document
    lock: Mutex<()>,
}

impl JsonRecordStore {
    /// Opens (or lazily creates) the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> Result<StoreDocument> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CustodiaError::Storage(format!("Failed to read store: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| CustodiaError::Storage(format!("Corrupt store document: {e}")))
    }

    async fn write_document(&self, doc: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| CustodiaError::Storage(format!("Failed to create dir: {e}")))?;
            }
        }
        let raw = serde_json::to_string_pretty(doc)
            .map_err(|e| CustodiaError::Storage(format!("Failed to serialize store: {e}")))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| CustodiaError::Storage(format!("Failed to write store: {e}")))
    }

    /// Registers a user account in the document
    pub async fn add_user(&self, user: User) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.users.push(user);
        self.write_document(&doc).await
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn fetch_all(&self) -> Result<Vec<PatientRecord>> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.patients.sort_by_key(|p| p.id);
        Ok(doc.patients)
    }

    async fn fetch(&self, id: PatientId) -> Result<Option<PatientRecord>> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;
        Ok(doc.patients.into_iter().find(|p| p.id == id))
    }

    async fn insert(
        &self,
        name: &str,
        contact: &str,
        diagnosis: &str,
        date_added: DateTime<Utc>,
    ) -> Result<PatientId> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.next_id += 1;
        let id = PatientId::new(doc.next_id).map_err(CustodiaError::Storage)?;
        doc.patients
            .push(PatientRecord::new(id, name, contact, diagnosis, date_added));
        self.write_document(&doc).await?;
        Ok(id)
    }

    async fn update(&self, id: PatientId, update: PatientUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        let record = doc
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CustodiaError::NotFound(format!("patient {id}")))?;
        update.apply(record);
        self.write_document(&doc).await
    }
}

#[async_trait]
impl UserStore for JsonRecordStore {
    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;
        Ok(doc.users.into_iter().find(|u| u.username == username))
    }
}

#[async_trait]
impl ConsentStore for JsonRecordStore {
    async fn consent(&self, user: UserId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;
        Ok(doc
            .users
            .iter()
            .find(|u| u.id == user)
            .map(|u| u.consent_given)
            .unwrap_or(false))
    }

    async fn set_consent(&self, user: UserId, accepted: bool, when: DateTime<Utc>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        let account = doc
            .users
            .iter_mut()
            .find(|u| u.id == user)
            .ok_or_else(|| CustodiaError::NotFound(format!("user {user}")))?;
        account.consent_given = accepted;
        account.consent_date = accepted.then_some(when);
        self.write_document(&doc).await
    }
}

/// Append-only JSON-lines audit sink
pub struct JsonAuditSink {
    path: PathBuf,
}

impl JsonAuditSink {
    /// Creates a sink appending to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CustodiaError::Audit(format!("Failed to create log dir: {e}")))?;
            }
        }
        Ok(Self { path })
    }
}

#[async_trait]
impl AuditSink for JsonAuditSink {
    async fn append(&self, entry: &AuditEntry) -> Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| CustodiaError::Audit(format!("Failed to serialize entry: {e}")))?;
        let path = self.path.clone();
        // Open in append mode per write; entries are rare and short-lived
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| CustodiaError::Audit(format!("Failed to open audit log: {e}")))?;
            writeln!(file, "{line}")
                .map_err(|e| CustodiaError::Audit(format!("Failed to write audit entry: {e}")))
        })
        .await
        .map_err(|e| CustodiaError::Audit(format!("Audit write task failed: {e}")))?
    }
}
