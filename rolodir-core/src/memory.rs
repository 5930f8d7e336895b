//! In-process record store, optionally backed by a JSON snapshot file.
//!
//! Every collection lives behind a `tokio::sync::watch` channel so that
//! subscribers see full-snapshot updates. When opened with a backing file the
//! whole tree is rewritten after each mutation (temp file + rename, so a
//! partial write never clobbers the previous snapshot).

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{RwLock, watch};

use crate::error::{RolodirError, RolodirResult};
use crate::record_path::{CollectionPath, RecordPath};
use crate::record_store::{RecordStore, Records};

pub struct MemoryStore {
    collections: RwLock<HashMap<String, watch::Sender<Records>>>,
    backing_file: Option<PathBuf>,
}

impl MemoryStore {
    /// An empty, purely in-memory store.
    pub fn new() -> Self {
        MemoryStore {
            collections: RwLock::new(HashMap::new()),
            backing_file: None,
        }
    }

    /// Open a store backed by a JSON snapshot file. A missing file starts the
    /// store empty; it is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> RolodirResult<Self> {
        let path = path.into();

        let mut collections = HashMap::new();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| RolodirError::RemoteUnavailable(e.to_string()))?;
            let tree: HashMap<String, Records> = serde_json::from_str(&content)
                .map_err(|e| RolodirError::Serialization(e.to_string()))?;
            for (collection_path, records) in tree {
                collections.insert(collection_path, watch::channel(records).0);
            }
        }

        Ok(MemoryStore {
            collections: RwLock::new(collections),
            backing_file: Some(path),
        })
    }

    async fn collection(&self, path: &CollectionPath) -> watch::Sender<Records> {
        let key = path.to_string();

        if let Some(tx) = self.collections.read().await.get(&key) {
            return tx.clone();
        }

        let mut map = self.collections.write().await;
        map.entry(key)
            .or_insert_with(|| watch::channel(Records::new()).0)
            .clone()
    }

    /// Rewrite the backing file from the current tree, if one is configured.
    async fn persist(&self) -> RolodirResult<()> {
        let Some(path) = &self.backing_file else {
            return Ok(());
        };

        let map = self.collections.read().await;
        let tree: HashMap<&String, Records> = map
            .iter()
            .map(|(key, tx)| (key, tx.borrow().clone()))
            .filter(|(_, records)| !records.is_empty())
            .collect();

        let content = serde_json::to_string_pretty(&tree)
            .map_err(|e| RolodirError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RolodirError::RemoteUnavailable(e.to_string()))?;
        }

        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, content)
            .map_err(|e| RolodirError::RemoteUnavailable(e.to_string()))?;
        std::fs::rename(&temp, path)
            .map_err(|e| RolodirError::RemoteUnavailable(e.to_string()))?;

        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn subscribe(
        &self,
        collection: &CollectionPath,
    ) -> RolodirResult<watch::Receiver<Records>> {
        Ok(self.collection(collection).await.subscribe())
    }

    async fn set(&self, record: &RecordPath, value: Value) -> RolodirResult<()> {
        let tx = self.collection(record.collection()).await;
        tx.send_modify(|records| {
            records.insert(record.key().to_string(), value);
        });
        self.persist().await
    }

    async fn merge(
        &self,
        record: &RecordPath,
        fields: serde_json::Map<String, Value>,
    ) -> RolodirResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let tx = self.collection(record.collection()).await;
        tx.send_modify(|records| {
            let entry = records
                .entry(record.key().to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new()));

            if let Value::Object(existing) = entry {
                for (field, value) in fields {
                    if value.is_null() {
                        existing.remove(&field);
                    } else {
                        existing.insert(field, value);
                    }
                }
            } else {
                *entry = Value::Object(fields);
            }
        });
        self.persist().await
    }

    async fn remove(&self, record: &RecordPath) -> RolodirResult<()> {
        let tx = self.collection(record.collection()).await;
        tx.send_modify(|records| {
            records.remove(record.key());
        });
        self.persist().await
    }

    async fn query_by_field(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> RolodirResult<Records> {
        let tx = self.collection(collection).await;
        let matches = tx
            .borrow()
            .iter()
            .filter(|(_, record)| record.get(field) == Some(value))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();
        Ok(matches)
    }
}
