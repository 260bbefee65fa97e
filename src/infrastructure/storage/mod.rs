//! File-based and in-memory key-value stores

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::domain::traits::{KeyValueStore, Record};
use crate::application::errors::StorageError;

/// JSON file store: one file per record at `<root>/<collection>/<key>.json`
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StorageError> {
        validate_name(collection)?;
        Ok(self.base_path.join(collection))
    }

    fn record_path(&self, collection: &str, key: &str) -> Result<PathBuf, StorageError> {
        validate_name(key)?;
        Ok(self.collection_dir(collection)?.join(format!("{}.json", key)))
    }
}

/// Names become path components, so they must stay inside their directory
fn validate_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(StorageError::Backend(format!("invalid record name: {:?}", name)));
    }
    Ok(())
}

#[async_trait]
impl KeyValueStore for JsonStore {
    async fn read_all(&self, collection: &str) -> Result<Vec<Record>, StorageError> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                tracing::warn!("Skipping record with non UTF-8 name: {}", path.display());
                continue;
            };
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Skipping unreadable record {}: {}", path.display(), e);
                    continue;
                }
            };
            match String::from_utf8(bytes) {
                Ok(value) => records.push((key.to_string(), value)),
                Err(e) => {
                    tracing::warn!("Skipping record {} with invalid UTF-8: {}", path.display(), e);
                }
            }
        }
        Ok(records)
    }

    async fn read(&self, collection: &str, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(collection, key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, collection: &str, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.collection_dir(collection)?;
        let path = self.record_path(collection, key)?;
        tokio::fs::create_dir_all(&dir).await?;

        // Write aside and rename so readers never see a half-written record
        let tmp = dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(collection, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, lost on exit
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read_all(&self, collection: &str) -> Result<Vec<Record>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn read(&self, collection: &str, key: &str) -> Result<Option<String>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(key))
            .cloned())
    }

    async fn write(&self, collection: &str, key: &str, value: &str) -> Result<(), StorageError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        let mut collections = self.collections.write().await;
        if let Some(records) = collections.get_mut(collection) {
            records.remove(key);
        }
        Ok(())
    }
}
