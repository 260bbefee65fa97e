//! Per-group settings, cached in memory and persisted through a key-value store

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::{GroupSettings, PrefixChange};
use crate::domain::traits::KeyValueStore;

/// Collection holding one settings record per group
pub const SERVERS_COLLECTION: &str = "Servers";

/// Durable group-id -> settings map with an in-memory cache
///
/// The cache only changes after the durable write succeeded.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    cache: RwLock<Cache>,
}

#[derive(Default)]
struct Cache {
    groups: HashMap<String, GroupSettings>,
    /// Keys other than the group id still holding a record for that group
    stale_keys: HashMap<String, Vec<String>>,
}

impl SettingsStore {
    /// Load every persisted record into the cache.
    ///
    /// Never fails: a record that doesn't parse is skipped, and a
    /// collection that can't be read leaves the cache empty. Records are
    /// keyed by their `GuildID`; one stored under the group id itself wins
    /// over copies stored under other keys.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut cache = Cache::default();

        match store.read_all(SERVERS_COLLECTION).await {
            Ok(records) => {
                let mut parsed = Vec::with_capacity(records.len());
                for (key, raw) in records {
                    match serde_json::from_str::<GroupSettings>(&raw) {
                        Ok(settings) => parsed.push((key, settings)),
                        Err(e) => {
                            tracing::warn!("Skipping unreadable settings record {}: {}", key, e);
                        }
                    }
                }

                parsed.sort_by_key(|(key, settings)| *key == settings.group_id);
                for (key, settings) in parsed {
                    if key != settings.group_id {
                        tracing::debug!("Settings for {} stored under key {}", settings.group_id, key);
                        cache
                            .stale_keys
                            .entry(settings.group_id.clone())
                            .or_default()
                            .push(key);
                    }
                    cache.groups.insert(settings.group_id.clone(), settings);
                }
            }
            Err(e) => {
                tracing::error!("Failed to read {} collection: {}", SERVERS_COLLECTION, e);
            }
        }

        tracing::info!("Loaded settings for {} groups", cache.groups.len());

        Self {
            store,
            cache: RwLock::new(cache),
        }
    }

    pub async fn get(&self, group_id: &str) -> Option<GroupSettings> {
        self.cache.read().await.groups.get(group_id).cloned()
    }

    /// Configured prefix for the group, or `default` when it has no record
    pub async fn prefix_for(&self, group_id: &str, default: &str) -> String {
        self.cache
            .read()
            .await
            .groups
            .get(group_id)
            .map(|s| s.prefix.clone())
            .unwrap_or_else(|| default.to_string())
    }

    /// Persist a new prefix for the group, then update the cache.
    ///
    /// The record is written under the group id; copies under any other key
    /// are removed afterwards. The write lock is held across the durable
    /// write so concurrent changes to the same group serialize.
    pub async fn set_prefix(
        &self,
        group_id: &str,
        new_prefix: &str,
        default: &str,
    ) -> Result<PrefixChange, StorageError> {
        let mut cache = self.cache.write().await;

        let mut settings = cache
            .groups
            .get(group_id)
            .cloned()
            .unwrap_or_else(|| GroupSettings::new(group_id, default));
        let previous = std::mem::replace(&mut settings.prefix, new_prefix.to_string());

        let raw = serde_json::to_string(&settings)?;
        self.store
            .write(SERVERS_COLLECTION, &settings.group_id, &raw)
            .await?;

        cache.groups.insert(settings.group_id.clone(), settings.clone());

        if let Some(keys) = cache.stale_keys.remove(group_id) {
            let mut remaining = Vec::new();
            for key in keys {
                if let Err(e) = self.store.delete(SERVERS_COLLECTION, &key).await {
                    tracing::warn!("Failed to remove old settings record {}: {}", key, e);
                    remaining.push(key);
                }
            }
            if !remaining.is_empty() {
                cache.stale_keys.insert(group_id.to_string(), remaining);
            }
        }

        Ok(PrefixChange { previous, settings })
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.groups.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.groups.is_empty()
    }
}
