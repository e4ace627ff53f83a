//! Add command implementation

use crate::cli::commands::{exit_code_for, CommandContext};
use clap::Args;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Patient full name
    #[arg(long)]
    pub name: String,

    /// Contact number
    #[arg(long)]
    pub contact: String,

    /// Diagnosis text
    #[arg(long)]
    pub diagnosis: String,
}

impl AddArgs {
    /// Execute the add command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = CommandContext::build(config_path).await?;

        match ctx
            .engine
            .add_patient(&ctx.operator, &self.name, &self.contact, &self.diagnosis)
            .await
        {
            Ok(id) => {
                println!("Added patient {id}");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to add patient: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
