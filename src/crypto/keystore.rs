//! File-backed key persistence
//!
//! The key persistence collaborator: the engine treats the key purely as an
//! in-memory byte string once loaded, and this store handles the disk side.
//! The file holds the key base64-encoded on a single line.

use crate::adapters::traits::KeyStore;
use crate::domain::{CustodiaError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Key store backed by a single file on disk
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Creates a store reading and writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn load_key(&self) -> Result<Option<Zeroizing<Vec<u8>>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let encoded = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CustodiaError::Io(format!("Failed to read key file: {e}")))?;
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| CustodiaError::Configuration(format!("Invalid key file: {e}")))?;
        Ok(Some(Zeroizing::new(bytes)))
    }

    async fn save_key(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| CustodiaError::Io(format!("Failed to create key dir: {e}")))?;
            }
        }
        tokio::fs::write(&self.path, BASE64.encode(bytes))
            .await
            .map_err(|e| CustodiaError::Io(format!("Failed to write key file: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keyring::KEY_SIZE;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileKeyStore::new(dir.path().join("custodia.key"));
        assert!(store.load_key().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileKeyStore::new(dir.path().join("custodia.key"));

        let key = vec![7u8; KEY_SIZE];
        store.save_key(&key).await.unwrap();

        let loaded = store.load_key().await.unwrap().unwrap();
        assert_eq!(loaded.as_slice(), key.as_slice());
    }

    #[tokio::test]
    async fn test_garbage_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custodia.key");
        tokio::fs::write(&path, "%%% not base64 %%%").await.unwrap();

        let store = FileKeyStore::new(path);
        assert!(matches!(
            store.load_key().await,
            Err(CustodiaError::Configuration(_))
        ));
    }
}
