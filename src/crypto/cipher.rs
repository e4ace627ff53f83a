//! Reversible authenticated field encryption
//!
//! Ciphertext format: base64(nonce || ChaCha20-Poly1305 ciphertext+tag).
//! A fresh random nonce is drawn per call, so encrypting the same value twice
//! yields different ciphertext while both decrypt to the original.
//!
//! Every operation fails closed with [`CustodiaError::KeyUnavailable`] when no
//! key is loaded, and decryption of malformed or foreign-key input fails with
//! a recoverable [`CustodiaError::DecryptFailed`] rather than panicking.

use crate::crypto::keyring::Keyring;
use crate::domain::{CustodiaError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, KeyInit, Nonce};
use rand::RngCore;
use std::sync::Arc;

/// Nonce length in bytes
pub const NONCE_SIZE: usize = 12;

/// Field-level cipher over a shared keyring
#[derive(Clone)]
pub struct FieldCipher {
    keyring: Arc<Keyring>,
}

impl FieldCipher {
    /// Creates a cipher reading its key from `keyring`
    pub fn new(keyring: Arc<Keyring>) -> Self {
        Self { keyring }
    }

    /// True when encryption is currently possible
    pub fn key_available(&self) -> bool {
        self.keyring.is_loaded()
    }

    /// Encrypts a plaintext field value
    ///
    /// # Errors
    ///
    /// Returns [`CustodiaError::KeyUnavailable`] if no key is loaded.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let key = self.keyring.current()?;
        let cipher = ChaCha20Poly1305::new(&key);

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        // The AEAD only rejects plaintext beyond its length limit
        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CustodiaError::Validation("plaintext too large to encrypt".to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(envelope))
    }

    /// Decrypts a ciphertext produced by [`encrypt`](Self::encrypt)
    ///
    /// # Errors
    ///
    /// Returns [`CustodiaError::KeyUnavailable`] if no key is loaded, or
    /// [`CustodiaError::DecryptFailed`] if the input is malformed, was
    /// produced under a different key, or has been tampered with. Both are
    /// recoverable; the stored ciphertext is left untouched.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let key = self.keyring.current()?;
        let cipher = ChaCha20Poly1305::new(&key);

        let envelope = BASE64
            .decode(ciphertext)
            .map_err(|e| CustodiaError::DecryptFailed(format!("invalid base64: {e}")))?;
        if envelope.len() <= NONCE_SIZE {
            return Err(CustodiaError::DecryptFailed(
                "ciphertext too short".to_string(),
            ));
        }

        let (nonce_bytes, payload) = envelope.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, payload)
            .map_err(|_| CustodiaError::DecryptFailed("key mismatch or tampered data".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| CustodiaError::DecryptFailed(format!("invalid utf-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher_with_key() -> FieldCipher {
        let keyring = Arc::new(Keyring::new());
        keyring.generate();
        FieldCipher::new(keyring)
    }

    #[test]
    fn test_round_trip() {
        let cipher = cipher_with_key();
        let ct = cipher.encrypt("John Doe").unwrap();
        assert_ne!(ct, "John Doe");
        assert_eq!(cipher.decrypt(&ct).unwrap(), "John Doe");
    }

    #[test]
    fn test_round_trip_empty_string() {
        let cipher = cipher_with_key();
        let ct = cipher.encrypt("").unwrap();
        assert_eq!(cipher.decrypt(&ct).unwrap(), "");
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let cipher = cipher_with_key();
        let a = cipher.encrypt("same value").unwrap();
        let b = cipher.encrypt("same value").unwrap();
        assert_ne!(a, b);
        assert_eq!(cipher.decrypt(&a).unwrap(), cipher.decrypt(&b).unwrap());
    }

    #[test]
    fn test_fails_closed_without_key() {
        let cipher = FieldCipher::new(Arc::new(Keyring::new()));
        assert!(!cipher.key_available());
        assert!(matches!(
            cipher.encrypt("x"),
            Err(CustodiaError::KeyUnavailable)
        ));
        assert!(matches!(
            cipher.decrypt("x"),
            Err(CustodiaError::KeyUnavailable)
        ));
    }

    #[test]
    fn test_foreign_key_decrypt_is_recoverable() {
        let ct = cipher_with_key().encrypt("secret").unwrap();
        let other = cipher_with_key();
        assert!(matches!(
            other.decrypt(&ct),
            Err(CustodiaError::DecryptFailed(_))
        ));
    }

    #[test]
    fn test_malformed_input_is_recoverable() {
        let cipher = cipher_with_key();
        assert!(matches!(
            cipher.decrypt("not base64 at all!!!"),
            Err(CustodiaError::DecryptFailed(_))
        ));
        assert!(matches!(
            cipher.decrypt("AAAA"),
            Err(CustodiaError::DecryptFailed(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let cipher = cipher_with_key();
        let ct = cipher.encrypt("integrity matters").unwrap();
        let mut bytes = BASE64.decode(&ct).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = BASE64.encode(bytes);
        assert!(matches!(
            cipher.decrypt(&tampered),
            Err(CustodiaError::DecryptFailed(_))
        ));
    }

    #[test]
    fn test_new_key_does_not_decrypt_old_ciphertext() {
        let keyring = Arc::new(Keyring::new());
        keyring.generate();
        let cipher = FieldCipher::new(keyring.clone());
        let ct = cipher.encrypt("before rotation").unwrap();

        keyring.generate();
        assert!(matches!(
            cipher.decrypt(&ct),
            Err(CustodiaError::DecryptFailed(_))
        ));
    }
}
