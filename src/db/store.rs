//! Key-value persistence
//!
//! The local store behind servings, preferences, favorites and lists.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::connection::{Database, DbError, DbResult};

/// String key-value store with get/set/remove semantics
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DbResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DbResult<()>;
    fn remove(&self, key: &str) -> DbResult<()>;

    /// Read and decode a JSON value
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and write a JSON value
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

/// In-memory store for tests and embedders without a database file
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DbResult<()> {
        let mut entries = self.entries.lock().map_err(|_| DbError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_store(store: &impl KeyValueStore) {
        assert_eq!(store.get("servings:abc").unwrap(), None);

        store.set("servings:abc", "4").unwrap();
        assert_eq!(store.get("servings:abc").unwrap().as_deref(), Some("4"));

        store.set("servings:abc", "6").unwrap();
        assert_eq!(store.get("servings:abc").unwrap().as_deref(), Some("6"));

        store.remove("servings:abc").unwrap();
        assert_eq!(store.get("servings:abc").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise_store(&MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store() {
        exercise_store(&Database::in_memory().unwrap());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        store.set_json("list", &vec!["a", "b"]).unwrap();
        let list: Option<Vec<String>> = store.get_json("list").unwrap();
        assert_eq!(list, Some(vec!["a".to_string(), "b".to_string()]));

        store.set("broken", "{not json").unwrap();
        assert!(store.get_json::<Vec<String>>("broken").is_err());
    }
}
