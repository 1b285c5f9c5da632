//! Key-value blob stores backing grid persistence.
//!
//! The grid only needs `get`/`set` on string keys. [`MemoryBlobStore`] is for
//! tests and ephemeral sessions; [`SqliteBlobStore`] keeps the blobs in a
//! single-table SQLite file under the user's data directory.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

#[derive(Debug)]
pub enum StoreError {
    /// SQLite open/query failure.
    Sqlite(String),
    /// Filesystem failure (creating the data directory, etc.).
    Io(String),
    /// A value could not be encoded for storage.
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(msg) => write!(f, "blob store error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// String-keyed blob storage.
pub trait BlobStore {
    /// The stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Delete every stored blob.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM blobs", [])?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Option<String> {
        let result = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional();
        match result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("failed to read blob '{key}': {e}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set_remove() {
        let mut store = MemoryBlobStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k"), Some("v2".to_string()));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_sqlite_store_overwrites() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();
        assert_eq!(store.get("tableRows"), None);
        store.set("tableRows", "[]").unwrap();
        store.set("tableRows", r#"[["a"]]"#).unwrap();
        assert_eq!(store.get("tableRows"), Some(r#"[["a"]]"#.to_string()));
    }

    #[test]
    fn test_sqlite_store_persists_across_connections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("grid.sqlite3");

        {
            let mut store = SqliteBlobStore::open(&path).unwrap();
            store.set("tableColumns", r#"["Task Name"]"#).unwrap();
        }

        let mut store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.get("tableColumns"), Some(r#"["Task Name"]"#.to_string()));
        store.clear().unwrap();
        assert_eq!(store.get("tableColumns"), None);
    }

    #[test]
    fn test_sqlite_remove() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".to_string()));
    }
}
