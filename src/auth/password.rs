//! One-way password hashing and verification
//!
//! SHA-256 over a fixed shared constant plus the password. Deterministic and
//! unsalted per user, which keeps stored hashes compatible with the existing
//! account data. Known hardening gap: a per-user salt and a slow KDF
//! (argon2/bcrypt) would be the production-grade choice; the stored-hash
//! format would have to be migrated to change this.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

// Shared, non-secret constant mixed into every hash
const SHARED_SALT: &str = "static_salt_for_demo";

/// Hashes a password into its stored lowercase-hex form
pub fn hash_password(password: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SHARED_SALT.as_bytes());
    hasher.update(password.expose_secret().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Recomputes and compares against a stored hash
pub fn verify_password(password: &SecretString, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password(&secret("admin123")), hash_password(&secret("admin123")));
    }

    #[test]
    fn test_hash_is_hex_sha256_length() {
        let hash = hash_password(&secret("doc123"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let stored = hash_password(&secret("rec123"));
        assert!(verify_password(&secret("rec123"), &stored));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let stored = hash_password(&secret("rec123"));
        assert!(!verify_password(&secret("rec124"), &stored));
        assert!(!verify_password(&secret(""), &stored));
    }

    #[test]
    fn test_verify_rejects_empty_stored_hash() {
        assert!(!verify_password(&secret("anything"), ""));
    }
}
