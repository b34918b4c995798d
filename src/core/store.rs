//! Persistence adapter consumed by the catalog
//!
//! The catalog only needs a handful of document-store primitives. Backends
//! live in [`crate::storage`]; each call is an independent round trip and may
//! fail on its own.

use crate::core::entity::RecordId;
use crate::core::error::StorageError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored document: a JSON object whose `id` key carries the [`RecordId`]
pub type Document = Map<String, Value>;

/// Conjunction of field equality conditions used by scans and bulk deletes
///
/// # Example
/// ```rust,ignore
/// let filter = Filter::eq("parentCategoryId", category.id.as_str());
/// let products = store.find_where("products", &filter).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Filter matching documents where `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_eq(field, value)
    }

    /// Add another equality condition
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Evaluate the filter against a document held in memory
    ///
    /// A missing field never matches. An empty filter matches everything.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Document store reached by the catalog (point lookup, scans, writes)
///
/// Ids are assigned by the backend on [`insert`](Self::insert). Lookups and
/// writes by an id the backend cannot even interpret behave as "no match".
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;

    /// Point lookup by id
    async fn find_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<Document>, StorageError>;

    /// Unfiltered scan, in insertion order where the backend preserves it
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError>;

    /// Filtered scan
    async fn find_where(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError>;

    /// Insert a new document; any `id` key in `document` is ignored.
    ///
    /// Returns the stored document including its generated `id`.
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StorageError>;

    /// Store `document` under a caller-chosen `id` unless that id is taken
    ///
    /// Returns the document now stored under `id`: the existing one when
    /// present (left untouched), otherwise the newly inserted one.
    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &RecordId,
        document: Document,
    ) -> Result<Document, StorageError>;

    /// Merge `patch` into the document matched by `id`
    ///
    /// Only keys present in `patch` change. Returns the updated document, or
    /// `None` when nothing matched.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: Document,
    ) -> Result<Option<Document>, StorageError>;

    /// Atomically add `delta` to the integer `field` of the matched document
    ///
    /// Returns the updated document, or `None` when nothing matched.
    async fn increment_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        field: &str,
        delta: i64,
    ) -> Result<Option<Document>, StorageError>;

    /// Delete the document matched by `id`, returning what was removed
    async fn delete_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> Result<Option<Document>, StorageError>;

    /// Delete every matching document, returning how many were removed
    async fn delete_where(&self, collection: &str, filter: &Filter) -> Result<u64, StorageError>;
}
