use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::traits::{KeyValueStore, Record};

/// SQLite-backed key-value store, all collections in one table
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<(), StorageError> {
        self.conn()?.execute(
            "CREATE TABLE IF NOT EXISTS records (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (collection, key)
            )",
            [],
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Backend("Lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn read_all(&self, collection: &str) -> Result<Vec<Record>, StorageError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM records WHERE collection = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            match row {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping unreadable record in {}: {}", collection, e),
            }
        }
        Ok(records)
    }

    async fn read(&self, collection: &str, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM records WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    async fn write(&self, collection: &str, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO records (collection, key, value, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![collection, key, value],
        )?;
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StorageError> {
        self.conn()?.execute(
            "DELETE FROM records WHERE collection = ?1 AND key = ?2",
            params![collection, key],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read_back() {
        let store = SqliteStore::in_memory().unwrap();
        store.write("Servers", "b", "two").await.unwrap();
        store.write("Servers", "a", "one").await.unwrap();
        store.write("Other", "a", "x").await.unwrap();

        assert_eq!(
            store.read_all("Servers").await.unwrap(),
            vec![
                ("a".to_string(), "one".to_string()),
                ("b".to_string(), "two".to_string()),
            ]
        );
        assert_eq!(store.read("Other", "a").await.unwrap().as_deref(), Some("x"));
        assert!(store.read("Servers", "c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces() {
        let store = SqliteStore::in_memory().unwrap();
        store.write("Servers", "g", "old").await.unwrap();
        store.write("Servers", "g", "new").await.unwrap();

        assert_eq!(
            store.read_all("Servers").await.unwrap(),
            vec![("g".to_string(), "new".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unreadable_row_is_skipped() {
        let store = SqliteStore::in_memory().unwrap();
        store.write("Servers", "good", "ok").await.unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO records (collection, key, value) VALUES ('Servers', 'bad', X'FFFE00')",
                [],
            )
            .unwrap();

        assert_eq!(
            store.read_all("Servers").await.unwrap(),
            vec![("good".to_string(), "ok".to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SqliteStore::in_memory().unwrap();
        store.write("Servers", "g", "v").await.unwrap();
        store.write("Other", "g", "w").await.unwrap();

        store.delete("Servers", "g").await.unwrap();
        store.delete("Servers", "g").await.unwrap();

        assert!(store.read("Servers", "g").await.unwrap().is_none());
        assert_eq!(store.read("Other", "g").await.unwrap().as_deref(), Some("w"));
    }
}
