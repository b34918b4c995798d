//! Record types stored in the catalog and the trait tying them to a collection

use crate::core::error::{CatalogError, StorageError};
use crate::core::store::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the store when a record is inserted.
///
/// The catalog never interprets the content: the in-memory backend hands out
/// UUID strings, MongoDB hands out ObjectId hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an id the store produced
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an id received from a client
    ///
    /// Blank ids can never match a stored record, so they are rejected as
    /// a validation failure instead of costing a store round trip.
    pub fn parse(argument: &str, raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Validation {
                argument: argument.to_string(),
                message: "id must not be blank".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record persisted in its own collection of the document store.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// GraphQL type name (e.g., "Category")
    const TYPE_NAME: &'static str;

    /// Store collection holding records of this type (e.g., "categories")
    const COLLECTION: &'static str;

    /// Store-assigned identifier
    fn id(&self) -> &RecordId;

    /// Decode a document returned by the store
    fn from_document(document: Document) -> Result<Self, StorageError> {
        serde_json::from_value(serde_json::Value::Object(document)).map_err(|e| {
            StorageError::Malformed {
                collection: Self::COLLECTION.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Root of the catalog hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

impl Record for Category {
    const TYPE_NAME: &'static str = "Category";
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// A product filed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    /// Foreign key to [`Category::id`].
    ///
    /// Always set, but the store does not enforce it: the category may have
    /// been deleted (or never existed), in which case the product is orphaned
    /// and `Product.category` resolves to null.
    pub parent_category_id: RecordId,
}

impl Record for Product {
    const TYPE_NAME: &'static str = "Product";
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub id: RecordId,
    pub number: i64,
}

impl Record for Counter {
    const TYPE_NAME: &'static str = "Counter";
    const COLLECTION: &'static str = "counters";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// One entry of the append-only time log. `time` is RFC 3339 text in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub id: RecordId,
    pub time: String,
}

impl Record for TimeRecord {
    const TYPE_NAME: &'static str = "TimeRecord";
    const COLLECTION: &'static str = "times";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
