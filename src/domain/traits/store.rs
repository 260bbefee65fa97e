use async_trait::async_trait;
use crate::application::errors::StorageError;

/// A stored record and the key it lives under
pub type Record = (String, String);

/// Key-value store - abstraction for durable record persistence
///
/// Records are raw serialized strings grouped into named collections.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Every readable record in a collection, as `(key, value)`.
    ///
    /// A record that can't be read is logged and left out; it never fails
    /// the whole listing. A collection that does not exist yet is empty.
    async fn read_all(&self, collection: &str) -> Result<Vec<Record>, StorageError>;

    /// A single record, if present
    async fn read(&self, collection: &str, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or replace a record
    async fn write(&self, collection: &str, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a record. Removing a missing record is not an error.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StorageError>;
}
