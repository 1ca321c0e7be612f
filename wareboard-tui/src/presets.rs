//! Saved filter presets, persisted in a local SQLite database.
//!
//! Presets are stored as JSON under namespaced keys so unrelated preset
//! kinds can share the table. A DashMap in front of the database absorbs
//! repeated reads within a session.

use std::path::Path;
use std::sync::Arc;

use async_sqlite::{Client, rusqlite};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key prefix for saved order filters.
pub const ORDER_FILTER_PREFIX: &str = "order-filter-presets/";

/// Preset storage error type.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite-backed preset storage with an in-memory read cache.
#[derive(Clone)]
pub struct PresetStore {
    client: Arc<Client>,
    cache: Arc<DashMap<String, String>>,
}

impl PresetStore {
    /// Open or create the preset database at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let client = async_sqlite::ClientBuilder::new()
            .path(path)
            .open()
            .await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS presets (
                        key TEXT PRIMARY KEY,
                        value TEXT NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client: Arc::new(client),
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Load a preset by name under a prefix.
    pub async fn get<T: DeserializeOwned>(
        &self,
        prefix: &str,
        name: &str,
    ) -> Result<Option<T>, PresetError> {
        let key = format!("{prefix}{name}");

        if let Some(json) = self.cache.get(&key) {
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let key_owned = key.clone();
        let json = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM presets WHERE key = ?")?;
                let mut rows = stmt.query([&key_owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, String>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        match json {
            Some(json) => {
                let value = serde_json::from_str(&json)?;
                self.cache.insert(key, json);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Save a preset under a prefix, replacing any previous value.
    pub async fn set<T: Serialize>(
        &self,
        prefix: &str,
        name: &str,
        value: &T,
    ) -> Result<(), PresetError> {
        let key = format!("{prefix}{name}");
        let json = serde_json::to_string(value)?;

        let key_owned = key.clone();
        let json_owned = json.clone();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO presets (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![&key_owned, &json_owned],
                )
            })
            .await?;

        self.cache.insert(key, json);
        Ok(())
    }

    /// Delete a preset.
    pub async fn delete(&self, prefix: &str, name: &str) -> Result<(), PresetError> {
        let key = format!("{prefix}{name}");

        let key_owned = key.clone();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM presets WHERE key = ?", [&key_owned]))
            .await?;

        self.cache.remove(&key);
        Ok(())
    }

    /// List preset names under a prefix.
    pub async fn names(&self, prefix: &str) -> Result<Vec<String>, PresetError> {
        let pattern = format!("{prefix}%");
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT key FROM presets WHERE key LIKE ?")?;
                let rows = stmt.query_map([&pattern], |row| row.get::<_, String>(0))?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await?;

        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(prefix).map(str::to_string))
            .collect())
    }
}
