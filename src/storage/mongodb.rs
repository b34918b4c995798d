//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStore`, a [`DocumentStore`] backed by a `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! catalog-graph = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One collection per record type (`categories`, `products`, `counters`,
//! `times`), the same layout the catalog's documents have always had.
//!
//! # Identifiers
//!
//! MongoDB generates an `ObjectId` on insert; it is exposed as its 24-char hex
//! string. The `id` field is mapped to MongoDB's `_id` convention. Ids that do
//! not parse as an ObjectId are matched as plain string `_id`s, so records
//! seeded with string ids (e.g. a counter singleton) stay reachable.

use crate::core::entity::RecordId;
use crate::core::error::StorageError;
use crate::core::store::{Document as JsonDocument, DocumentStore, Filter};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Database};
use serde_json::Value;

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a JSON object into a BSON Document, dropping any `id` key: ids are
/// owned by MongoDB.
fn json_to_document(mut json: JsonDocument) -> Result<Document, StorageError> {
    json.remove("id");

    match mongodb::bson::to_bson(&Value::Object(json)) {
        Ok(Bson::Document(d)) => Ok(d),
        Ok(_) => Err(StorageError::query(BACKEND, "Expected BSON document, got non-object")),
        Err(e) => Err(StorageError::query(
            BACKEND,
            format!("Failed to convert JSON to BSON: {}", e),
        )),
    }
}

/// Convert a BSON Document back into a JSON object, renaming `_id` → `id`.
fn document_to_json(mut doc: Document) -> JsonDocument {
    let id = doc.remove("_id").map(|id| bson_id_to_string(&id));

    let mut json = match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => JsonDocument::new(),
    };
    if let Some(id) = id {
        json.insert("id".to_string(), Value::String(id));
    }
    json
}

fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the `_id` match for a record id.
fn id_filter(id: &RecordId) -> Document {
    match ObjectId::parse_str(id.as_str()) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id.as_str() },
    }
}

fn filter_to_document(filter: &Filter) -> Result<Document, StorageError> {
    let mut document = Document::new();
    for (field, value) in filter.conditions() {
        let value = mongodb::bson::to_bson(value).map_err(|e| {
            StorageError::query(BACKEND, format!("Invalid filter value for '{}': {}", field, e))
        })?;
        document.insert(field, value);
    }
    Ok(document)
}

fn query_error(action: &str, e: mongodb::error::Error) -> StorageError {
    StorageError::query(BACKEND, format!("Failed to {}: {}", action, e))
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Document store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// let store = MongoStore::connect("mongodb://localhost:27017", "main").await?;
/// store.ensure_indexes().await?;
/// let service = CatalogService::new(Arc::new(store), singletons);
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `uri` and use `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::Connection {
                backend: BACKEND,
                message: e.to_string(),
            })?;
        Ok(Self::new(client.database(database)))
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }

    /// Index the product → category reference used by relation scans and
    /// the category cascade.
    ///
    /// Idempotent; called on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        use mongodb::IndexModel;

        self.collection("products")
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "parentCategoryId": 1 })
                    .build(),
            )
            .await
            .map_err(|e| query_error("create index on products", e))?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<JsonDocument>, StorageError> {
        let doc = self
            .collection(collection)
            .find_one(id_filter(id))
            .await
            .map_err(|e| query_error("find document", e))?;

        Ok(doc.map(document_to_json))
    }

    /// List all documents in natural (insertion) order.
    async fn find_all(&self, collection: &str) -> Result<Vec<JsonDocument>, StorageError> {
        self.find_where(collection, &Filter::default()).await
    }

    async fn find_where(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<JsonDocument>, StorageError> {
        let cursor = self
            .collection(collection)
            .find(filter_to_document(filter)?)
            .await
            .map_err(|e| query_error("scan documents", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| query_error("collect documents", e))?;

        Ok(docs.into_iter().map(document_to_json).collect())
    }

    /// Insert a new document and return it with the generated `_id` as `id`.
    async fn insert(
        &self,
        collection: &str,
        document: JsonDocument,
    ) -> Result<JsonDocument, StorageError> {
        let doc = json_to_document(document)?;

        let result = self
            .collection(collection)
            .insert_one(doc.clone())
            .await
            .map_err(|e| query_error("insert document", e))?;

        let mut stored = document_to_json(doc);
        stored.insert(
            "id".to_string(),
            Value::String(bson_id_to_string(&result.inserted_id)),
        );
        Ok(stored)
    }

    /// Upsert with `$setOnInsert`, so an existing document is never modified.
    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &RecordId,
        document: JsonDocument,
    ) -> Result<JsonDocument, StorageError> {
        let mut on_insert = json_to_document(document)?;
        if on_insert.is_empty() {
            on_insert = id_filter(id);
        }

        let stored = self
            .collection(collection)
            .find_one_and_update(id_filter(id), doc! { "$setOnInsert": on_insert })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| query_error("upsert document", e))?;

        stored.map(document_to_json).ok_or_else(|| {
            StorageError::query(BACKEND, format!("Upsert of '{}' returned no document", id))
        })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: JsonDocument,
    ) -> Result<Option<JsonDocument>, StorageError> {
        let patch = json_to_document(patch)?;
        if patch.is_empty() {
            return self.find_by_id(collection, id).await;
        }

        let updated = self
            .collection(collection)
            .find_one_and_update(id_filter(id), doc! { "$set": patch })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| query_error("update document", e))?;

        Ok(updated.map(document_to_json))
    }

    async fn increment_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        field: &str,
        delta: i64,
    ) -> Result<Option<JsonDocument>, StorageError> {
        let updated = self
            .collection(collection)
            .find_one_and_update(id_filter(id), doc! { "$inc": { field: delta } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| query_error("increment field", e))?;

        Ok(updated.map(document_to_json))
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<JsonDocument>, StorageError> {
        let removed = self
            .collection(collection)
            .find_one_and_delete(id_filter(id))
            .await
            .map_err(|e| query_error("delete document", e))?;

        Ok(removed.map(document_to_json))
    }

    async fn delete_where(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError> {
        let result = self
            .collection(collection)
            .delete_many(filter_to_document(filter)?)
            .await
            .map_err(|e| query_error("delete documents", e))?;

        Ok(result.deleted_count)
    }
}
