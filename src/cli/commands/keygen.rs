//! Keygen command implementation
//!
//! Generates a fresh 32-byte key and persists it to the configured key file.
//! Replacing an existing key does not re-encrypt stored ciphertext; rows
//! encrypted under the old key fall back to placeholders from then on.

use crate::adapters::traits::KeyStore;
use crate::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use crate::config::load_config;
use crate::crypto::keyring::Keyring;
use crate::crypto::keystore::FileKeyStore;
use clap::Args;
use std::path::Path;

/// Arguments for the keygen command
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Overwrite an existing key file
    #[arg(long)]
    pub force: bool,
}

impl KeygenArgs {
    /// Execute the keygen command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let key_path = &config.encryption.key_path;
        if Path::new(key_path).exists() && !self.force {
            println!("Key file already exists: {key_path}");
            println!("Use --force to replace it. Existing ciphertext will become unreadable.");
            return Ok(EXIT_CONFIG);
        }

        let keyring = Keyring::new();
        let bytes = keyring.generate();

        match FileKeyStore::new(key_path).save_key(&bytes).await {
            Ok(()) => {
                tracing::info!(path = %key_path, "Encryption key generated");
                println!("Encryption key written to {key_path}");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to write key file: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
