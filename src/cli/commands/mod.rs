//! CLI command implementations
//!
//! Shared wiring lives here: every command that touches records builds a
//! [`CommandContext`] holding the engine and the operator identity its
//! actions are attributed to.

pub mod add;
pub mod export;
pub mod init;
pub mod keygen;
pub mod list;
pub mod protect;
pub mod sweep;
pub mod validate;

use crate::adapters::jsonfile::{JsonAuditSink, JsonRecordStore};
use crate::adapters::traits::{AuditSink, ConsentStore, KeyStore, RecordStore, UserStore};
use crate::config::{load_config, CustodiaConfig};
use crate::core::{ProtectionEngine, RetentionPolicy};
use crate::crypto::keyring::Keyring;
use crate::crypto::keystore::FileKeyStore;
use crate::domain::ids::UserId;
use crate::domain::user::{Actor, Role, User};
use crate::domain::CustodiaError;
use chrono::Utc;
use std::sync::Arc;

/// Exit code for partial batch failures
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for denied capabilities
pub const EXIT_FORBIDDEN: i32 = 3;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Maps an engine error to the command exit code
pub(crate) fn exit_code_for(err: &CustodiaError) -> i32 {
    match err {
        CustodiaError::Forbidden { .. } => EXIT_FORBIDDEN,
        CustodiaError::Configuration(_) | CustodiaError::KeyUnavailable => EXIT_CONFIG,
        _ => EXIT_FATAL,
    }
}

/// Everything a record-touching command needs
pub(crate) struct CommandContext {
    pub config: CustodiaConfig,
    pub engine: ProtectionEngine,
    pub operator: Actor,
}

impl CommandContext {
    /// Loads configuration and wires the engine over the file-backed stores
    ///
    /// Loads the persisted key into the keyring when the key file exists and
    /// seeds the operator account (admin, consent on record) on first use.
    pub async fn build(config_path: &str) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;

        let store = Arc::new(JsonRecordStore::new(&config.store.data_path));
        let audit: Arc<dyn AuditSink> = Arc::new(JsonAuditSink::new(&config.store.audit_path)?);

        let keyring = Arc::new(Keyring::new());
        let keystore = FileKeyStore::new(&config.encryption.key_path);
        if let Some(bytes) = keystore.load_key().await? {
            keyring.load(&bytes)?;
            tracing::debug!(path = %config.encryption.key_path, "Encryption key loaded");
        }

        let operator = ensure_operator(&store, &config).await?;

        let engine = ProtectionEngine::new(
            store.clone() as Arc<dyn RecordStore>,
            store.clone() as Arc<dyn UserStore>,
            store as Arc<dyn ConsentStore>,
            audit,
            keyring,
            RetentionPolicy::new(config.retention.days),
        );

        Ok(Self {
            config,
            engine,
            operator,
        })
    }
}

/// Seeds the configured operator account if it does not exist yet
///
/// The operator runs with the admin capability set and consent already on
/// record; CLI commands are administrative by nature.
async fn ensure_operator(store: &Arc<JsonRecordStore>, config: &CustodiaConfig) -> anyhow::Result<Actor> {
    let id = UserId::new(config.operator.user_id).map_err(CustodiaError::Configuration)?;

    if store
        .user_by_username(&config.operator.username)
        .await?
        .is_none()
    {
        store
            .add_user(User {
                id,
                username: config.operator.username.clone(),
                password_hash: String::new(),
                role: Role::Admin,
                consent_given: true,
                consent_date: Some(Utc::now()),
            })
            .await?;
        tracing::info!(username = %config.operator.username, "Operator account created");
    }

    Ok(Actor {
        id,
        username: config.operator.username.clone(),
        role: Role::Admin,
    })
}
