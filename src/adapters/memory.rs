//! In-memory collaborator implementation
//!
//! Backs the engine in tests and demos: one store implements every contract
//! so a full scenario can run without touching disk. Audit entries are kept
//! in a growable list that the trait surface can only append to; the extra
//! read accessors here are the collaborator-side query surface for test
//! assertions.

use crate::adapters::traits::{AuditSink, ConsentStore, RecordStore, UserStore};
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::ids::{PatientId, UserId};
use crate::domain::patient::{PatientRecord, PatientUpdate};
use crate::domain::user::User;
use crate::domain::{CustodiaError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: i64,
    patients: Vec<PatientRecord>,
    users: Vec<User>,
    entries: Vec<AuditEntry>,
    fail_updates_for: HashSet<PatientId>,
}

/// In-memory record/user/consent store and audit sink
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user account
    pub async fn add_user(&self, user: User) {
        self.inner.lock().await.users.push(user);
    }

    /// Snapshot of all audit entries written so far
    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().await.entries.clone()
    }

    /// Audit entries for one action kind
    pub async fn entries_for(&self, action: AuditAction) -> Vec<AuditEntry> {
        self.inner
            .lock()
            .await
            .entries
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }

    /// Makes every subsequent update of `id` fail with a storage error.
    /// Used to exercise partial-batch behavior.
    pub async fn fail_updates_for(&self, id: PatientId) {
        self.inner.lock().await.fail_updates_for.insert(id);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<PatientRecord>> {
        Ok(self.inner.lock().await.patients.clone())
    }

    async fn fetch(&self, id: PatientId) -> Result<Option<PatientRecord>> {
        Ok(self
            .inner
            .lock()
            .await
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert(
        &self,
        name: &str,
        contact: &str,
        diagnosis: &str,
        date_added: DateTime<Utc>,
    ) -> Result<PatientId> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = PatientId::new(inner.next_id).map_err(CustodiaError::Storage)?;
        inner
            .patients
            .push(PatientRecord::new(id, name, contact, diagnosis, date_added));
        Ok(id)
    }

    async fn update(&self, id: PatientId, update: PatientUpdate) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.fail_updates_for.contains(&id) {
            return Err(CustodiaError::Storage(format!(
                "injected update failure for record {id}"
            )));
        }
        let record = inner
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CustodiaError::NotFound(format!("patient {id}")))?;
        update.apply(record);
        Ok(())
    }
}

#[async_trait]
impl AuditSink for MemoryStore {
    async fn append(&self, entry: &AuditEntry) -> Result<()> {
        self.inner.lock().await.entries.push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl ConsentStore for MemoryStore {
    async fn consent(&self, user: UserId) -> Result<bool> {
        Ok(self
            .inner
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.id == user)
            .map(|u| u.consent_given)
            .unwrap_or(false))
    }

    async fn set_consent(&self, user: UserId, accepted: bool, when: DateTime<Utc>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let account = inner
            .users
            .iter_mut()
            .find(|u| u.id == user)
            .ok_or_else(|| CustodiaError::NotFound(format!("user {user}")))?;
        account.consent_given = accepted;
        account.consent_date = accepted.then_some(when);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.insert("A", "1", "x", Utc::now()).await.unwrap();
        let b = store.insert("B", "2", "y", Utc::now()).await.unwrap();
        assert!(a < b);

        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a);
        assert_eq!(all[1].id, b);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .update(PatientId::new(99).unwrap(), PatientUpdate::default())
            .await;
        assert!(matches!(result, Err(CustodiaError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_injected_update_failure() {
        let store = MemoryStore::new();
        let id = store.insert("A", "1", "x", Utc::now()).await.unwrap();
        store.fail_updates_for(id).await;
        let result = store.update(id, PatientUpdate::default()).await;
        assert!(matches!(result, Err(CustodiaError::Storage(_))));
    }

    #[tokio::test]
    async fn test_consent_defaults_to_false() {
        let store = MemoryStore::new();
        let id = UserId::new(1).unwrap();
        store
            .add_user(User {
                id,
                username: "alice".to_string(),
                password_hash: String::new(),
                role: Role::Receptionist,
                consent_given: false,
                consent_date: None,
            })
            .await;

        assert!(!store.consent(id).await.unwrap());
        store.set_consent(id, true, Utc::now()).await.unwrap();
        assert!(store.consent(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_decline_clears_consent_date() {
        let store = MemoryStore::new();
        let id = UserId::new(2).unwrap();
        store
            .add_user(User {
                id,
                username: "bob".to_string(),
                password_hash: String::new(),
                role: Role::Doctor,
                consent_given: true,
                consent_date: Some(Utc::now()),
            })
            .await;

        store.set_consent(id, false, Utc::now()).await.unwrap();
        let user = store.user_by_username("bob").await.unwrap().unwrap();
        assert!(!user.consent_given);
        assert!(user.consent_date.is_none());
    }
}
