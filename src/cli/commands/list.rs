//! List command implementation

use crate::cli::commands::{exit_code_for, CommandContext};
use crate::policy::view::DisplayMode;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show decrypted PII instead of the anonymized default
    #[arg(long)]
    pub decrypted: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = CommandContext::build(config_path).await?;
        let mode = if self.decrypted {
            DisplayMode::Decrypted
        } else {
            DisplayMode::Anonymized
        };

        match ctx.engine.view_patients(&ctx.operator, mode).await {
            Ok(rows) => {
                if rows.is_empty() {
                    println!("No patient records.");
                    return Ok(0);
                }
                println!("{:<6} {:<24} {:<16} DIAGNOSIS", "ID", "NAME", "CONTACT");
                for row in rows {
                    println!(
                        "{:<6} {:<24} {:<16} {}",
                        row.id, row.name, row.contact, row.diagnosis
                    );
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to list patients: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
