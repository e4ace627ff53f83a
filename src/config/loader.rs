//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CustodiaConfig;
use crate::domain::errors::CustodiaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CustodiaConfig
/// 4. Applies environment variable overrides (CUSTODIA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<CustodiaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CustodiaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CustodiaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CustodiaConfig = toml::from_str(&contents)
        .map_err(|e| CustodiaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CustodiaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. A placeholder referencing an unset
/// variable is an error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CustodiaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CUSTODIA_* prefix
///
/// Variables follow the pattern CUSTODIA_<SECTION>_<KEY>, for example
/// CUSTODIA_RETENTION_DAYS or CUSTODIA_STORE_DATA_PATH.
fn apply_env_overrides(config: &mut CustodiaConfig) {
    if let Ok(val) = std::env::var("CUSTODIA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CUSTODIA_RETENTION_DAYS") {
        if let Ok(days) = val.parse() {
            config.retention.days = days;
        }
    }

    if let Ok(val) = std::env::var("CUSTODIA_ENCRYPTION_KEY_PATH") {
        config.encryption.key_path = val;
    }

    if let Ok(val) = std::env::var("CUSTODIA_STORE_DATA_PATH") {
        config.store.data_path = val;
    }
    if let Ok(val) = std::env::var("CUSTODIA_STORE_AUDIT_PATH") {
        config.store.audit_path = val;
    }

    if let Ok(val) = std::env::var("CUSTODIA_OPERATOR_USER_ID") {
        if let Ok(id) = val.parse() {
            config.operator.user_id = id;
        }
    }
    if let Ok(val) = std::env::var("CUSTODIA_OPERATOR_USERNAME") {
        config.operator.username = val;
    }

    if let Ok(val) = std::env::var("CUSTODIA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CUSTODIA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
