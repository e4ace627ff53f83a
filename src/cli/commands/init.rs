//! Init command implementation
//!
//! Generates a starter configuration file.

use crate::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "custodia.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: custodia validate-config");
                println!("  3. Generate an encryption key: custodia keygen");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to write configuration file: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate starter configuration
    fn generate_config() -> String {
        r#"# Custodia Configuration File
# Patient record protection engine

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[retention]
# Records strictly older than this many days are archived by `custodia sweep`
days = 365

[encryption]
# Base64-encoded 32-byte key, created by `custodia keygen`
key_path = "data/custodia.key"

[store]
# Patient and user records
data_path = "data/records.json"
# Append-only audit trail (one JSON object per line)
audit_path = "data/audit.jsonl"

[operator]
# Identity CLI actions are attributed to in the audit trail
user_id = 1
username = "operator"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "custodia.toml".to_string(),
            force: false,
        };
        assert_eq!(args.output, "custodia.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_parses() {
        let raw = InitArgs::generate_config();
        let config: crate::config::CustodiaConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config.retention.days, 365);
        assert!(config.validate().is_ok());
    }
}
