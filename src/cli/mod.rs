//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Custodia using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Custodia - patient record protection engine
#[derive(Parser, Debug)]
#[command(name = "custodia")]
#[command(version, about, long_about = None)]
#[command(author = "Custodia Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "custodia.toml", env = "CUSTODIA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CUSTODIA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Generate and persist a fresh encryption key
    Keygen(commands::keygen::KeygenArgs),

    /// Add a patient record
    Add(commands::add::AddArgs),

    /// List patient records
    List(commands::list::ListArgs),

    /// Anonymize or encrypt all patient records
    Protect(commands::protect::ProtectArgs),

    /// Archive records older than the retention window
    Sweep(commands::sweep::SweepArgs),

    /// Export patient records or the audit log
    Export(commands::export::ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["custodia", "list"]);
        assert_eq!(cli.config, "custodia.toml");
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["custodia", "--config", "custom.toml", "sweep"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Sweep(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["custodia", "--log-level", "debug", "keygen"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::parse_from([
            "custodia", "add", "--name", "John Doe", "--contact", "0300-555-1234",
            "--diagnosis", "Flu",
        ]);
        assert!(matches!(cli.command, Commands::Add(_)));
    }

    #[test]
    fn test_cli_parse_protect_modes() {
        let cli = Cli::parse_from(["custodia", "protect", "anonymize"]);
        assert!(matches!(cli.command, Commands::Protect(_)));
        let cli = Cli::parse_from(["custodia", "protect", "encrypt"]);
        assert!(matches!(cli.command, Commands::Protect(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["custodia", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["custodia", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
