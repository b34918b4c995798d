//! Shared test harness for document store backends
//!
//! Provides document builders and the `document_store_tests!` macro that
//! runs the `DocumentStore` contract against any backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! document_store_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod document_store_tests;

use catalog::core::store::Document;
use serde_json::{Value, json};

pub const CATEGORIES: &str = "categories";
pub const PRODUCTS: &str = "products";
pub const COUNTERS: &str = "counters";

/// Turn a `json!` object literal into a store document
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn category_doc(name: &str) -> Document {
    doc(json!({ "name": name }))
}

pub fn product_doc(name: &str, parent_category_id: &str) -> Document {
    doc(json!({ "name": name, "parentCategoryId": parent_category_id }))
}

pub fn counter_doc(number: i64) -> Document {
    doc(json!({ "number": number }))
}

/// Id of a stored document, as assigned by the backend
pub fn id_of(document: &Document) -> String {
    document
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| panic!("document has no string id: {document:?}"))
}

/// Sorted `name` values of a list of documents
pub fn names(documents: &[Document]) -> Vec<String> {
    let mut names: Vec<String> = documents
        .iter()
        .filter_map(|d| d.get("name").and_then(Value::as_str).map(str::to_string))
        .collect();
    names.sort();
    names
}
