//! Login and logout protocol
//!
//! Every credential failure surfaces to the caller as the same generic
//! [`CustodiaError::InvalidCredentials`], so the login form cannot be used to
//! probe which usernames exist. The actual cause is kept in the audit trail
//! (when there is an actor to attribute it to) and in tracing output.

use crate::adapters::traits::{AuditSink, UserStore};
use crate::auth::password::verify_password;
use crate::domain::audit::{AuditAction, AuditEntry};
use crate::domain::user::Actor;
use crate::domain::{CustodiaError, Result};
use secrecy::SecretString;
use std::sync::Arc;

/// Authenticates users against the user store and audits every attempt
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    audit: Arc<dyn AuditSink>,
}

impl Authenticator {
    /// Creates an authenticator over the given collaborators
    pub fn new(users: Arc<dyn UserStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self { users, audit }
    }

    /// Attempts a login, returning the sanitized actor on success
    ///
    /// An unknown username writes no audit entry (there is no actor id to
    /// attribute it to); a known account with an empty stored hash or a wrong
    /// password writes a failed-attempt entry before failing.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Actor> {
        let user = match self.users.user_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username, "Login attempt for unknown username");
                return Err(CustodiaError::InvalidCredentials);
            }
        };
        let actor = Actor::from_user(&user);

        if user.password_hash.is_empty() {
            self.audit
                .append(&AuditEntry::new(
                    &actor,
                    AuditAction::Login,
                    "failed - no password hash",
                ))
                .await?;
            tracing::warn!(username, "Login rejected: account has no password hash");
            return Err(CustodiaError::InvalidCredentials);
        }

        if !verify_password(password, &user.password_hash) {
            self.audit
                .append(&AuditEntry::new(
                    &actor,
                    AuditAction::Login,
                    "failed - wrong password",
                ))
                .await?;
            tracing::warn!(username, "Login rejected: wrong password");
            return Err(CustodiaError::InvalidCredentials);
        }

        self.audit
            .append(&AuditEntry::new(&actor, AuditAction::Login, "successful"))
            .await?;
        tracing::info!(username, role = %actor.role, "Login successful");
        Ok(actor)
    }

    /// Records an explicit logout
    pub async fn logout(&self, actor: &Actor) -> Result<()> {
        self.audit
            .append(&AuditEntry::new(
                actor,
                AuditAction::Logout,
                "user logged out",
            ))
            .await?;
        tracing::info!(username = %actor.username, "Logout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::auth::password::hash_password;
    use crate::domain::ids::UserId;
    use crate::domain::user::{Role, User};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    async fn store_with_user(password_hash: String) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .add_user(User {
                id: UserId::new(1).unwrap(),
                username: "admin".to_string(),
                password_hash,
                role: Role::Admin,
                consent_given: false,
                consent_date: None,
            })
            .await;
        store
    }

    fn authenticator(store: &Arc<MemoryStore>) -> Authenticator {
        Authenticator::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_successful_login_returns_sanitized_actor() {
        let store = store_with_user(hash_password(&secret("admin123"))).await;
        let auth = authenticator(&store);

        let actor = auth.login("admin", &secret("admin123")).await.unwrap();
        assert_eq!(actor.username, "admin");
        assert_eq!(actor.role, Role::Admin);

        let entries = store.entries_for(AuditAction::Login).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detail, "successful");
    }

    #[tokio::test]
    async fn test_unknown_user_fails_generic_with_no_audit() {
        let store = store_with_user(hash_password(&secret("admin123"))).await;
        let auth = authenticator(&store);

        let err = auth.login("ghost", &secret("whatever")).await.unwrap_err();
        assert!(matches!(err, CustodiaError::InvalidCredentials));
        assert!(store.audit_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_fails_generic_but_is_audited() {
        let store = store_with_user(hash_password(&secret("admin123"))).await;
        let auth = authenticator(&store);

        let err = auth.login("admin", &secret("nope")).await.unwrap_err();
        assert!(matches!(err, CustodiaError::InvalidCredentials));

        let entries = store.entries_for(AuditAction::Login).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detail, "failed - wrong password");
    }

    #[tokio::test]
    async fn test_empty_stored_hash_fails_safely() {
        let store = store_with_user(String::new()).await;
        let auth = authenticator(&store);

        // Hash of "" under the shared salt is non-empty, so this must not pass
        let err = auth.login("admin", &secret("")).await.unwrap_err();
        assert!(matches!(err, CustodiaError::InvalidCredentials));

        let entries = store.entries_for(AuditAction::Login).await;
        assert_eq!(entries[0].detail, "failed - no password hash");
    }

    #[tokio::test]
    async fn test_logout_is_audited() {
        let store = store_with_user(hash_password(&secret("admin123"))).await;
        let auth = authenticator(&store);
        let actor = auth.login("admin", &secret("admin123")).await.unwrap();

        auth.logout(&actor).await.unwrap();
        let entries = store.entries_for(AuditAction::Logout).await;
        assert_eq!(entries.len(), 1);
    }
}
