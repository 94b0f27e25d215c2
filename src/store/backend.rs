//! JSON file persistence for the account snapshot

use super::{AccountBackend, AccountSnapshot, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the snapshot as pretty-printed JSON at `path`
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AccountBackend for JsonFileBackend {
    /// A missing file yields the sample account
    async fn load(&self) -> Result<AccountSnapshot, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "No account store yet, using sample data"
                );
                Ok(AccountSnapshot::sample())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the old one
    async fn save(&self, snapshot: &AccountSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "Account store saved");
        Ok(())
    }
}
