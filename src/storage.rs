use crate::errors::StorageError;
use std::{collections::BTreeMap, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const USER_TOKEN_KEY: &str = "userToken";
pub const USER_DATA_KEY: &str = "userData";
pub const JOURNAL_ENTRIES_KEY: &str = "journalEntries";

#[derive(Debug, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = load_items(&path).await;
        Self {
            path: Some(path),
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// The in-memory value is updated even when flushing fails.
    pub async fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value);
        self.flush().await
    }

    pub async fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_none() {
            return Ok(());
        }
        self.flush().await
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(&self.items)?;
        fs::write(path, payload).await?;
        Ok(())
    }
}

async fn load_items(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(err) => {
                error!("failed to parse storage file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read storage file: {err}");
            BTreeMap::new()
        }
    }
}
