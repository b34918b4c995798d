//! In-memory implementation of DocumentStore for testing and development

use crate::core::entity::RecordId;
use crate::core::error::StorageError;
use crate::core::store::{Document, DocumentStore, Filter};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

type Collection = IndexMap<RecordId, Document>;

/// In-memory document store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// collections keep insertion order so scans are deterministic. Ids are
/// UUID v4 strings.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(
        &self,
        f: impl FnOnce(&HashMap<String, Collection>) -> R,
    ) -> Result<R, StorageError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| {
                StorageError::query(BACKEND, format!("Failed to acquire read lock: {}", e))
            })?;
        Ok(f(&collections))
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Collection>) -> R,
    ) -> Result<R, StorageError> {
        let mut collections = self.collections.write().map_err(|e| {
            StorageError::query(BACKEND, format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(f(&mut collections))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<Document>, StorageError> {
        self.read(|c| c.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError> {
        self.read(|c| {
            c.get(collection)
                .map(|docs| docs.values().cloned().collect())
                .unwrap_or_default()
        })
    }

    async fn find_where(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        self.read(|c| {
            c.get(collection)
                .map(|docs| {
                    docs.values()
                        .filter(|doc| filter.matches(doc))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Document, StorageError> {
        let id = RecordId::new(Uuid::new_v4().to_string());
        document.insert("id".to_string(), Value::String(id.to_string()));

        self.write(|c| {
            c.entry(collection.to_string())
                .or_default()
                .insert(id, document.clone());
        })?;

        Ok(document)
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &RecordId,
        mut document: Document,
    ) -> Result<Document, StorageError> {
        document.insert("id".to_string(), Value::String(id.to_string()));

        self.write(|c| {
            c.entry(collection.to_string())
                .or_default()
                .entry(id.clone())
                .or_insert(document)
                .clone()
        })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: Document,
    ) -> Result<Option<Document>, StorageError> {
        self.write(|c| {
            let doc = c.get_mut(collection)?.get_mut(id)?;
            for (key, value) in patch {
                if key != "id" {
                    doc.insert(key, value);
                }
            }
            Some(doc.clone())
        })
    }

    async fn increment_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        field: &str,
        delta: i64,
    ) -> Result<Option<Document>, StorageError> {
        self.write(|c| {
            let Some(doc) = c.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
                return Ok(None);
            };
            let current = match doc.get(field) {
                None | Some(Value::Null) => 0,
                Some(value) => value.as_i64().ok_or_else(|| {
                    StorageError::query(
                        BACKEND,
                        format!("Cannot increment non-integer field '{}'", field),
                    )
                })?,
            };
            doc.insert(field.to_string(), Value::from(current + delta));
            Ok(Some(doc.clone()))
        })?
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<Document>, StorageError> {
        self.write(|c| c.get_mut(collection)?.shift_remove(id))
    }

    async fn delete_where(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError> {
        self.write(|c| {
            let Some(docs) = c.get_mut(collection) else {
                return 0;
            };
            let before = docs.len();
            docs.retain(|_, doc| !filter.matches(doc));
            (before - docs.len()) as u64
        })
    }
}
