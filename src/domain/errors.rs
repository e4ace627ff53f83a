//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Credential failures deliberately collapse into a single generic variant so
//! the presentation layer cannot be used to enumerate valid usernames; the
//! specific cause is kept in the audit trail and tracing output only.

use crate::domain::user::Role;
use crate::policy::Capability;
use thiserror::Error;

/// Main Custodia error type
///
/// This is the primary error type used throughout the engine.
#[derive(Debug, Error)]
pub enum CustodiaError {
    /// Login failed: unknown user, empty stored hash, or wrong password.
    /// The distinction is audited internally but never surfaced here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The actor has not accepted the consent notice yet
    #[error("Consent required before accessing patient records")]
    ConsentRequired,

    /// The actor's role does not grant the attempted capability
    #[error("Forbidden: role '{role}' may not perform {capability:?}")]
    Forbidden {
        /// Role that attempted the action
        role: Role,
        /// Capability that was denied
        capability: Capability,
    },

    /// Referenced record or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Encrypt/decrypt was attempted with no key loaded
    #[error("Encryption key unavailable")]
    KeyUnavailable,

    /// Ciphertext was malformed or produced under a different key.
    /// Recoverable: callers substitute a placeholder and continue.
    #[error("Decryption failed: {0}")]
    DecryptFailed(String),

    /// Invalid caller input (empty required field, bad argument)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audit sink errors. These propagate to the caller rather than being
    /// swallowed; an unlogged security action is itself a failure.
    #[error("Audit error: {0}")]
    Audit(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CustodiaError {
    fn from(err: std::io::Error) -> Self {
        CustodiaError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CustodiaError {
    fn from(err: serde_json::Error) -> Self {
        CustodiaError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CustodiaError {
    fn from(err: toml::de::Error) -> Self {
        CustodiaError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_is_generic() {
        let err = CustodiaError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_forbidden_display_names_role_and_capability() {
        let err = CustodiaError::Forbidden {
            role: Role::Doctor,
            capability: Capability::ViewAuditLog,
        };
        let msg = err.to_string();
        assert!(msg.contains("doctor"));
        assert!(msg.contains("ViewAuditLog"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CustodiaError = io_err.into();
        assert!(matches!(err, CustodiaError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CustodiaError = json_err.into();
        assert!(matches!(err, CustodiaError::Serialization(_)));
    }

    #[test]
    fn test_implements_std_error() {
        let err = CustodiaError::KeyUnavailable;
        let _: &dyn std::error::Error = &err;
    }
}
