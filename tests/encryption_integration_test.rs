//! Encryption flows through the engine: fail-closed behavior, decrypted
//! views, and key replacement fallbacks

use custodia::adapters::memory::MemoryStore;
use custodia::adapters::traits::RecordStore;
use custodia::auth::password::hash_password;
use custodia::core::{ProtectionEngine, RetentionPolicy};
use custodia::crypto::keyring::Keyring;
use custodia::domain::audit::AuditAction;
use custodia::domain::ids::UserId;
use custodia::domain::user::{Actor, Role, User};
use custodia::domain::CustodiaError;
use custodia::policy::view::DisplayMode;
use secrecy::SecretString;
use std::sync::Arc;

fn secret(s: &str) -> SecretString {
    SecretString::new(s.to_string())
}

async fn setup(keyring: Arc<Keyring>) -> (Arc<MemoryStore>, ProtectionEngine, Actor) {
    let store = Arc::new(MemoryStore::new());
    store
        .add_user(User {
            id: UserId::new(1).unwrap(),
            username: "admin".to_string(),
            password_hash: hash_password(&secret("admin123")),
            role: Role::Admin,
            consent_given: false,
            consent_date: None,
        })
        .await;

    let engine = ProtectionEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        keyring,
        RetentionPolicy::default(),
    );
    let admin = engine.login("admin", &secret("admin123")).await.unwrap();
    engine.record_consent(&admin, true).await.unwrap();
    (store, engine, admin)
}

#[tokio::test]
async fn test_encrypt_all_fails_closed_without_key() {
    let (store, engine, admin) = setup(Arc::new(Keyring::new())).await;
    engine
        .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
        .await
        .unwrap();

    let err = engine.encrypt_all(&admin).await.unwrap_err();
    assert!(matches!(err, CustodiaError::KeyUnavailable));

    // No record was touched and nothing was falsely audited
    let records = store.fetch_all().await.unwrap();
    assert!(records[0].encrypted_name.is_none());
    assert!(store.entries_for(AuditAction::Encrypt).await.is_empty());
}

#[tokio::test]
async fn test_keyless_engine_still_serves_anonymized_views() {
    let (_store, engine, admin) = setup(Arc::new(Keyring::new())).await;
    engine
        .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
        .await
        .unwrap();

    let rows = engine
        .view_patients(&admin, DisplayMode::Anonymized)
        .await
        .unwrap();
    assert_eq!(rows[0].name, "ANON_6cea57c2");
}

#[tokio::test]
async fn test_encrypt_all_fills_fields_and_decrypted_view_round_trips() {
    let keyring = Arc::new(Keyring::new());
    keyring.generate();
    let (store, engine, admin) = setup(keyring).await;
    engine
        .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
        .await
        .unwrap();

    let outcome = engine.encrypt_all(&admin).await.unwrap();
    assert_eq!(outcome.succeeded, 1);

    let records = store.fetch_all().await.unwrap();
    let ciphertext = records[0].encrypted_name.as_deref().unwrap();
    assert!(!ciphertext.is_empty());
    assert!(!ciphertext.contains("John"));

    let rows = engine
        .view_patients(&admin, DisplayMode::Decrypted)
        .await
        .unwrap();
    assert_eq!(rows[0].name, "John Doe");
    assert_eq!(rows[0].contact, "0300-555-1234");

    assert_eq!(store.entries_for(AuditAction::Encrypt).await.len(), 1);
}

#[tokio::test]
async fn test_replacing_key_falls_back_to_raw_values() {
    let keyring = Arc::new(Keyring::new());
    keyring.generate();
    let (_store, engine, admin) = setup(keyring).await;
    engine
        .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
        .await
        .unwrap();
    engine.encrypt_all(&admin).await.unwrap();

    // New key; old ciphertext stops decrypting, raw values survive the view
    engine.keyring().generate();
    let rows = engine
        .view_patients(&admin, DisplayMode::Decrypted)
        .await
        .unwrap();
    assert_eq!(rows[0].name, "John Doe");
}

#[tokio::test]
async fn test_encryption_is_idempotent_per_run_but_nonces_differ() {
    let keyring = Arc::new(Keyring::new());
    keyring.generate();
    let (store, engine, admin) = setup(keyring).await;
    engine
        .add_patient(&admin, "John Doe", "0300-555-1234", "Flu")
        .await
        .unwrap();

    engine.encrypt_all(&admin).await.unwrap();
    let first = store.fetch_all().await.unwrap()[0]
        .encrypted_name
        .clone()
        .unwrap();

    engine.encrypt_all(&admin).await.unwrap();
    let second = store.fetch_all().await.unwrap()[0]
        .encrypted_name
        .clone()
        .unwrap();

    // Fresh nonce per encryption call
    assert_ne!(first, second);

    // Both still open to the same plaintext
    assert_eq!(engine.cipher().decrypt(&first).unwrap(), "John Doe");
    assert_eq!(engine.cipher().decrypt(&second).unwrap(), "John Doe");
}
