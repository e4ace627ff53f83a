//! Process-wide encryption key holder
//!
//! The key lives in an explicit shared holder passed into the cipher instead
//! of ambient module state, so key lifetime and absence are testable in
//! isolation. Reads happen on every transform call; writes only through
//! explicit load/generate operations, last-writer-wins.
//!
//! Replacing the key does not re-encrypt existing ciphertext. Old ciphertext
//! simply stops decrypting and callers fall back to placeholders.

use crate::domain::{CustodiaError, Result};
use chacha20poly1305::Key;
use rand::RngCore;
use std::sync::RwLock;
use zeroize::Zeroizing;

/// Symmetric key length in bytes
pub const KEY_SIZE: usize = 32;

/// Shared holder for the optional process-wide symmetric key
#[derive(Debug, Default)]
pub struct Keyring {
    key: RwLock<Option<Key>>,
}

impl Keyring {
    /// Creates an empty keyring (encryption disabled until a key is loaded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a keyring pre-loaded with `bytes`
    pub fn with_key(bytes: &[u8]) -> Result<Self> {
        let ring = Self::new();
        ring.load(bytes)?;
        Ok(ring)
    }

    /// True when a key is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.key.read().expect("keyring lock poisoned").is_some()
    }

    /// Loads `bytes` as the current key, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is not exactly 32 bytes.
    pub fn load(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != KEY_SIZE {
            return Err(CustodiaError::Configuration(format!(
                "Encryption key must be {KEY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let key = Key::clone_from_slice(bytes);
        *self.key.write().expect("keyring lock poisoned") = Some(key);
        Ok(())
    }

    /// Generates a fresh random key, replaces the current one, and returns a
    /// copy of the bytes for the caller to persist
    ///
    /// The keyring itself never touches storage; persistence is the key store
    /// collaborator's job.
    pub fn generate(&self) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(vec![0u8; KEY_SIZE]);
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let key = Key::clone_from_slice(&bytes);
        *self.key.write().expect("keyring lock poisoned") = Some(key);
        bytes
    }

    /// Returns a copy of the current key, or `KeyUnavailable`
    pub(crate) fn current(&self) -> Result<Key> {
        self.key
            .read()
            .expect("keyring lock poisoned")
            .as_ref()
            .copied()
            .ok_or(CustodiaError::KeyUnavailable)
    }
}
