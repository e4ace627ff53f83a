//! Export command implementation
//!
//! `export patients` writes the role-scoped patient rows as JSON;
//! `export logs` copies the audit log. Both exports are themselves audited.

use crate::cli::commands::{exit_code_for, CommandContext, EXIT_FATAL};
use crate::policy::view::DisplayMode;
use clap::{Args, ValueEnum};

/// What to export
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportTarget {
    /// Patient records
    Patients,
    /// Audit log entries
    Logs,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// What to export
    #[arg(value_enum)]
    pub target: ExportTarget,

    /// Output file path
    #[arg(short, long)]
    pub output: String,

    /// Export decrypted PII instead of the anonymized default (patients only)
    #[arg(long)]
    pub decrypted: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = CommandContext::build(config_path).await?;

        match self.target {
            ExportTarget::Patients => self.export_patients(&ctx).await,
            ExportTarget::Logs => self.export_logs(&ctx).await,
        }
    }

    async fn export_patients(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        let mode = if self.decrypted {
            DisplayMode::Decrypted
        } else {
            DisplayMode::Anonymized
        };

        let rows = match ctx.engine.export_patients(&ctx.operator, mode).await {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let json = serde_json::to_string_pretty(&rows)?;
        if let Err(e) = tokio::fs::write(&self.output, json).await {
            eprintln!("Failed to write {}: {e}", self.output);
            return Ok(EXIT_FATAL);
        }

        println!("Exported {} patient row(s) to {}", rows.len(), self.output);
        Ok(0)
    }

    async fn export_logs(&self, ctx: &CommandContext) -> anyhow::Result<i32> {
        let audit_path = &ctx.config.store.audit_path;
        let raw = match tokio::fs::read_to_string(audit_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                eprintln!("Failed to read audit log {audit_path}: {e}");
                return Ok(EXIT_FATAL);
            }
        };
        let count = raw.lines().filter(|l| !l.trim().is_empty()).count();

        if let Err(e) = tokio::fs::write(&self.output, &raw).await {
            eprintln!("Failed to write {}: {e}", self.output);
            return Ok(EXIT_FATAL);
        }

        if let Err(e) = ctx.engine.record_log_export(&ctx.operator, count).await {
            eprintln!("Export written but could not be audited: {e}");
            return Ok(exit_code_for(&e));
        }

        println!("Exported {count} audit entr(ies) to {}", self.output);
        Ok(0)
    }
}
