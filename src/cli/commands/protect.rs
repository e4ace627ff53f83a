//! Protect command implementation
//!
//! Runs the batch transforms: `protect anonymize` fills the cached
//! anonymized fields, `protect encrypt` fills the encrypted fields under the
//! loaded key.

use crate::cli::commands::{exit_code_for, CommandContext, EXIT_PARTIAL};
use crate::core::BatchOutcome;
use clap::{Args, ValueEnum};

/// Which transform to run over all records
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProtectMode {
    /// Fill cached anonymized name/contact fields
    Anonymize,
    /// Fill encrypted name/contact fields
    Encrypt,
}

/// Arguments for the protect command
#[derive(Args, Debug)]
pub struct ProtectArgs {
    /// Transform to apply
    #[arg(value_enum)]
    pub mode: ProtectMode,
}

impl ProtectArgs {
    /// Execute the protect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = CommandContext::build(config_path).await?;

        let result = match self.mode {
            ProtectMode::Anonymize => ctx.engine.anonymize_all(&ctx.operator).await,
            ProtectMode::Encrypt => ctx.engine.encrypt_all(&ctx.operator).await,
        };

        match result {
            Ok(outcome) => {
                report(&outcome);
                if outcome.is_clean() {
                    Ok(0)
                } else {
                    Ok(EXIT_PARTIAL)
                }
            }
            Err(e) => {
                eprintln!("Protect failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

fn report(outcome: &BatchOutcome) {
    println!(
        "Transformed {} record(s), skipped {} archived",
        outcome.succeeded, outcome.skipped
    );
    for (id, error) in &outcome.errors {
        eprintln!("  patient {id}: {error}");
    }
}
