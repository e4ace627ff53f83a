//! Sweep command implementation
//!
//! Applies the retention policy: records strictly older than the configured
//! window are irreversibly archived.

use crate::cli::commands::{exit_code_for, CommandContext, EXIT_PARTIAL};
use chrono::Utc;
use clap::Args;

/// Arguments for the sweep command
#[derive(Args, Debug)]
pub struct SweepArgs {}

impl SweepArgs {
    /// Execute the sweep command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = CommandContext::build(config_path).await?;

        match ctx
            .engine
            .run_retention_sweep(&ctx.operator, Utc::now())
            .await
        {
            Ok(outcome) => {
                println!(
                    "Archived {} record(s) older than {} days, {} left alone",
                    outcome.archived,
                    ctx.engine.retention().days(),
                    outcome.skipped
                );
                for (id, error) in &outcome.errors {
                    eprintln!("  patient {id}: {error}");
                }
                if outcome.is_clean() {
                    Ok(0)
                } else {
                    Ok(EXIT_PARTIAL)
                }
            }
            Err(e) => {
                eprintln!("Sweep failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
