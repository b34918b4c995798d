//! Catalog operations behind the GraphQL resolvers
//!
//! `CatalogService` owns every store round trip the schema performs. The
//! resolvers only translate arguments and results; lookups, partial updates,
//! the counter increment and the category cascade are implemented here.

use crate::core::entity::{Category, Counter, Product, Record, RecordId, TimeRecord};
use crate::core::error::CatalogError;
use crate::core::singleton::{self, SingletonRegistry};
use crate::core::store::{Document, DocumentStore, Filter};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

/// Stored field holding a product's category reference
const PARENT_CATEGORY_FIELD: &str = "parentCategoryId";

/// Fields of a product that `update_product` may change
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub parent_category_id: Option<RecordId>,
}

impl ProductPatch {
    fn into_document(self) -> Document {
        let mut patch = Document::new();
        if let Some(name) = self.name {
            patch.insert("name".to_string(), Value::String(name));
        }
        if let Some(parent) = self.parent_category_id {
            patch.insert(
                PARENT_CATEGORY_FIELD.to_string(),
                Value::String(parent.to_string()),
            );
        }
        patch
    }
}

/// Typed catalog operations over a [`DocumentStore`]
///
/// Cheap to clone; every clone shares the same store and singleton registry.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    singletons: Arc<SingletonRegistry>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>, singletons: SingletonRegistry) -> Self {
        Self {
            store,
            singletons: Arc::new(singletons),
        }
    }

    pub fn singletons(&self) -> &SingletonRegistry {
        &self.singletons
    }

    // === Generic helpers ===

    async fn find<T: Record>(&self, id: &RecordId) -> Result<Option<T>, CatalogError> {
        match self.store.find_by_id(T::COLLECTION, id).await? {
            Some(document) => Ok(Some(T::from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn list<T: Record>(&self) -> Result<Vec<T>, CatalogError> {
        let documents = self.store.find_all(T::COLLECTION).await?;
        decode_all(documents)
    }

    async fn insert<T: Record>(&self, fields: Value) -> Result<T, CatalogError> {
        let document = match fields {
            Value::Object(map) => map,
            _ => Document::new(),
        };
        let stored = self.store.insert(T::COLLECTION, document).await?;
        let record = T::from_document(stored)?;
        tracing::debug!(entity = T::TYPE_NAME, id = %record.id(), "record created");
        Ok(record)
    }

    async fn update<T: Record>(&self, id: &RecordId, patch: Document) -> Result<T, CatalogError> {
        let updated = self
            .store
            .update_by_id(T::COLLECTION, id, patch)
            .await?
            .ok_or_else(|| CatalogError::not_found(T::TYPE_NAME, id))?;
        tracing::debug!(entity = T::TYPE_NAME, id = %id, "record updated");
        Ok(T::from_document(updated)?)
    }

    async fn delete<T: Record>(&self, id: &RecordId) -> Result<T, CatalogError> {
        let removed = self
            .store
            .delete_by_id(T::COLLECTION, id)
            .await?
            .ok_or_else(|| CatalogError::not_found(T::TYPE_NAME, id))?;
        tracing::debug!(entity = T::TYPE_NAME, id = %id, "record deleted");
        Ok(T::from_document(removed)?)
    }

    // === Queries ===

    pub async fn product(&self, id: &RecordId) -> Result<Option<Product>, CatalogError> {
        self.find(id).await
    }

    pub async fn category(&self, id: &RecordId) -> Result<Option<Category>, CatalogError> {
        self.find(id).await
    }

    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.list().await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.list().await
    }

    pub async fn counters(&self) -> Result<Vec<Counter>, CatalogError> {
        self.list().await
    }

    pub async fn time_records(&self) -> Result<Vec<TimeRecord>, CatalogError> {
        self.list().await
    }

    // === Relations ===

    /// Category a product points at, or `None` when the product is orphaned
    pub async fn product_category(
        &self,
        product: &Product,
    ) -> Result<Option<Category>, CatalogError> {
        self.find(&product.parent_category_id).await
    }

    /// Every product whose `parentCategoryId` is this category's id
    pub async fn category_products(
        &self,
        category: &Category,
    ) -> Result<Vec<Product>, CatalogError> {
        let filter = Filter::eq(PARENT_CATEGORY_FIELD, category.id.as_str());
        let documents = self.store.find_where(Product::COLLECTION, &filter).await?;
        decode_all(documents)
    }

    // === Mutations ===

    pub async fn create_category(&self, name: &str) -> Result<Category, CatalogError> {
        self.insert(json!({ "name": name })).await
    }

    /// Create a product; the parent category is not checked for existence
    pub async fn create_product(
        &self,
        name: &str,
        parent_category_id: &RecordId,
    ) -> Result<Product, CatalogError> {
        self.insert(json!({
            "name": name,
            PARENT_CATEGORY_FIELD: parent_category_id.as_str(),
        }))
        .await
    }

    pub async fn create_counter(&self, number: i64) -> Result<Counter, CatalogError> {
        self.insert(json!({ "number": number })).await
    }

    /// Return the counter stored under `id`, creating it at `start` if absent
    ///
    /// An existing counter keeps its number.
    pub async fn ensure_counter(
        &self,
        id: &RecordId,
        start: i64,
    ) -> Result<Counter, CatalogError> {
        let mut fields = Document::new();
        fields.insert("number".to_string(), json!(start));
        let stored = self
            .store
            .insert_if_absent(Counter::COLLECTION, id, fields)
            .await?;
        Ok(Counter::from_document(stored)?)
    }

    /// Append the current instant to the time log
    pub async fn create_time(&self) -> Result<TimeRecord, CatalogError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.insert(json!({ "time": now })).await
    }

    pub async fn update_category(
        &self,
        id: &RecordId,
        name: &str,
    ) -> Result<Category, CatalogError> {
        let mut patch = Document::new();
        patch.insert("name".to_string(), Value::String(name.to_string()));
        self.update(id, patch).await
    }

    /// Merge the supplied fields into a product
    ///
    /// An empty patch still has to match a product: it degenerates into a
    /// lookup and fails with NotFound when the id is unknown.
    pub async fn update_product(
        &self,
        id: &RecordId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        let patch = patch.into_document();
        if patch.is_empty() {
            return self
                .find(id)
                .await?
                .ok_or_else(|| CatalogError::not_found(Product::TYPE_NAME, id));
        }
        self.update(id, patch).await
    }

    /// Add one to the registered counter singleton
    pub async fn increment_counter(&self) -> Result<Counter, CatalogError> {
        let id = self.singletons.resolve(singleton::COUNTER).ok_or_else(|| {
            CatalogError::SingletonMissing {
                entity: Counter::TYPE_NAME,
                name: singleton::COUNTER.to_string(),
            }
        })?;

        let updated = self
            .store
            .increment_by_id(Counter::COLLECTION, id, "number", 1)
            .await?
            .ok_or_else(|| CatalogError::not_found(Counter::TYPE_NAME, id))?;
        let counter = Counter::from_document(updated)?;
        tracing::debug!(id = %id, number = counter.number, "counter incremented");
        Ok(counter)
    }

    pub async fn delete_product(&self, id: &RecordId) -> Result<Product, CatalogError> {
        self.delete(id).await
    }

    /// Delete a category together with every product filed under it
    ///
    /// Runs as two independent store calls: products first, then the
    /// category. When the category does not exist the call fails with
    /// NotFound, but products already removed in the first step stay removed.
    pub async fn delete_category(&self, id: &RecordId) -> Result<Category, CatalogError> {
        let filter = Filter::eq(PARENT_CATEGORY_FIELD, id.as_str());
        let removed_products = self.store.delete_where(Product::COLLECTION, &filter).await?;

        match self.delete::<Category>(id).await {
            Ok(category) => {
                tracing::info!(
                    category_id = %id,
                    removed_products,
                    "category deleted with its products"
                );
                Ok(category)
            }
            Err(e) => {
                if removed_products > 0 {
                    tracing::warn!(
                        category_id = %id,
                        removed_products,
                        error = %e,
                        "products removed but category deletion failed"
                    );
                }
                Err(e)
            }
        }
    }
}

fn decode_all<T: Record>(documents: Vec<Document>) -> Result<Vec<T>, CatalogError> {
    documents
        .into_iter()
        .map(|d| T::from_document(d).map_err(CatalogError::from))
        .collect()
}
