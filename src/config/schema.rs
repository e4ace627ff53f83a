//! Configuration schema types
//!
//! Root structure mapping to the `custodia.toml` file, one struct per
//! section, each with its own validation.

use serde::{Deserialize, Serialize};

/// Main Custodia configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustodiaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Retention policy settings
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Encryption key settings
    pub encryption: EncryptionConfig,

    /// Record and audit store settings
    pub store: StoreConfig,

    /// The operator identity CLI commands run as
    #[serde(default)]
    pub operator: OperatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CustodiaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.retention.validate()?;
        self.encryption.validate()?;
        self.store.validate()?;
        self.operator.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retention policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Retention window in days; records strictly older are archived
    #[serde(default = "default_retention_days")]
    pub days: i64,
}

impl RetentionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.days <= 0 {
            return Err(format!("retention.days must be > 0, got {}", self.days));
        }
        Ok(())
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            days: default_retention_days(),
        }
    }
}

/// Encryption key configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Path to the base64-encoded key file
    pub key_path: String,
}

impl EncryptionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.key_path.is_empty() {
            return Err("encryption.key_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Record and audit store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the patient/user JSON document
    pub data_path: String,

    /// Path to the append-only audit log (JSON lines)
    pub audit_path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_path.is_empty() {
            return Err("store.data_path cannot be empty".to_string());
        }
        if self.audit_path.is_empty() {
            return Err("store.audit_path cannot be empty".to_string());
        }
        if self.data_path == self.audit_path {
            return Err("store.data_path and store.audit_path must differ".to_string());
        }
        Ok(())
    }
}

/// Identity the CLI attributes its actions to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// User id recorded in audit entries
    #[serde(default = "default_operator_user_id")]
    pub user_id: i64,

    /// Username recorded in audit entries
    #[serde(default = "default_operator_username")]
    pub username: String,
}

impl OperatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.user_id <= 0 {
            return Err(format!(
                "operator.user_id must be > 0, got {}",
                self.user_id
            ));
        }
        if self.username.is_empty() {
            return Err("operator.username cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            user_id: default_operator_user_id(),
            username: default_operator_username(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_retention_days() -> i64 {
    365
}

fn default_operator_user_id() -> i64 {
    1
}

fn default_operator_username() -> String {
    "operator".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
