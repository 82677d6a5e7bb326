//! Key-value persistence port.
//!
//! Every store in BerryGuard persists whole JSON documents under a fixed key,
//! the same shape the dashboard originally kept in browser storage. Backends
//! only move strings; typing and validation happen in `load_json`/`save_json`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{Config, StorageBackend};

pub mod file;
pub mod memory;
pub mod redis;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

/// Key holding the account list.
pub const USERS_KEY: &str = "berryguard_db_users";
/// Key holding the active session, absent when logged out.
pub const SESSION_KEY: &str = "berryguard_session";
/// Key holding the watering alarm list.
pub const ALARMS_KEY: &str = "berryguard_alarms";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Stored value under '{key}' is malformed: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Raw string key-value storage. Implementations must make `set` and `remove`
/// visible to the next `get` on the same instance.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the document under `key`. A missing key is `Ok(None)`;
/// a present but undecodable one is `StorageError::Corrupt`.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}

/// Builds the backend selected by configuration.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn KvStore>> {
    let store: Arc<dyn KvStore> = match &config.storage_backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage (state is lost on restart)");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File { data_dir } => {
            let store = FileStore::open(data_dir).await?;
            info!("Using file storage at {}", data_dir.display());
            Arc::new(store)
        }
        StorageBackend::Redis { url } => {
            let store = RedisStore::connect(url).await?;
            info!("Using Redis storage");
            Arc::new(store)
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Record> = load_json(&store, "absent").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_malformed_document_is_corrupt() {
        let store = MemoryStore::new();
        store.set("records", "{not json").await.unwrap();

        let err = load_json::<Vec<Record>>(&store, "records")
            .await
            .unwrap_err();
        assert!(
            matches!(err, StorageError::Corrupt { ref key, .. } if key == "records"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_is_corrupt() {
        let store = MemoryStore::new();
        store
            .set("records", r#"[{"id": "a", "count": "three"}]"#)
            .await
            .unwrap();

        let err = load_json::<Vec<Record>>(&store, "records")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_saved_value_loads_back() {
        let store = MemoryStore::new();
        let records = vec![Record {
            id: "a".to_string(),
            count: 3,
        }];
        save_json(&store, "records", &records).await.unwrap();

        let loaded: Vec<Record> = load_json(&store, "records").await.unwrap().unwrap();
        assert_eq!(loaded, records);
    }
}
