//! Macro-generated test suite for the `DocumentStore` contract.
//!
//! The `document_store_tests!` macro generates a test module that validates
//! any `DocumentStore` implementation: point lookups, scans, equality
//! filters, caller-keyed upserts, post-update results, atomic increments
//! and both delete forms.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use catalog::storage::InMemoryStore;
//!
//! document_store_tests!(InMemoryStore::new());
//! ```

/// Generate a full `DocumentStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store implementing
/// `DocumentStore`. It is re-evaluated for each test.
#[macro_export]
macro_rules! document_store_tests {
    ($factory:expr) => {
        mod document_store_contract_tests {
            use super::*;
            use catalog::core::entity::RecordId;
            use catalog::core::store::{DocumentStore, Filter};
            use serde_json::json;
            use std::sync::Arc;

            async fn store() -> Arc<dyn DocumentStore> {
                Arc::new($factory)
            }

            // ==================================================================
            // Insert & lookups
            // ==================================================================

            #[tokio::test]
            async fn test_insert_assigns_id() {
                let store = store().await;
                let created = store.insert(CATEGORIES, category_doc("Drinks")).await.unwrap();

                let id = id_of(&created);
                assert!(!id.is_empty());
                assert_eq!(created["name"], "Drinks");
            }

            #[tokio::test]
            async fn test_insert_ignores_client_id() {
                let store = store().await;
                let created = store
                    .insert(CATEGORIES, doc(json!({ "id": "chosen", "name": "Snacks" })))
                    .await
                    .unwrap();

                assert_ne!(id_of(&created), "chosen");
            }

            #[tokio::test]
            async fn test_insert_if_absent_inserts_then_keeps_existing() {
                let store = store().await;
                let id = RecordId::new("counter");

                let first = store.insert_if_absent(COUNTERS, &id, counter_doc(0)).await.unwrap();
                assert_eq!(id_of(&first), "counter");
                assert_eq!(first["number"], 0);

                store.increment_by_id(COUNTERS, &id, "number", 1).await.unwrap();
                let second = store.insert_if_absent(COUNTERS, &id, counter_doc(99)).await.unwrap();
                assert_eq!(id_of(&second), "counter");
                assert_eq!(second["number"], 1);

                let all = store.find_all(COUNTERS).await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0], second);
            }

            #[tokio::test]
            async fn test_find_by_id() {
                let store = store().await;
                let created = store.insert(CATEGORIES, category_doc("Drinks")).await.unwrap();
                let id = RecordId::new(id_of(&created));

                let found = store.find_by_id(CATEGORIES, &id).await.unwrap().unwrap();
                assert_eq!(found, created);
            }

            #[tokio::test]
            async fn test_find_by_id_missing() {
                let store = store().await;
                let missing = RecordId::new("5f0000000000000000000000");
                assert!(store.find_by_id(CATEGORIES, &missing).await.unwrap().is_none());

                let malformed = RecordId::new("not-an-object-id");
                assert!(store.find_by_id(CATEGORIES, &malformed).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_all_empty() {
                let store = store().await;
                assert!(store.find_all(PRODUCTS).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_all_multiple() {
                let store = store().await;
                for name in ["Cola", "Water", "Juice"] {
                    store.insert(PRODUCTS, product_doc(name, "c1")).await.unwrap();
                }

                let all = store.find_all(PRODUCTS).await.unwrap();
                assert_eq!(names(&all), vec!["Cola", "Juice", "Water"]);
            }

            #[tokio::test]
            async fn test_collections_are_separate() {
                let store = store().await;
                store.insert(CATEGORIES, category_doc("Drinks")).await.unwrap();

                assert!(store.find_all(PRODUCTS).await.unwrap().is_empty());
                assert_eq!(store.find_all(CATEGORIES).await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_find_where_eq() {
                let store = store().await;
                store.insert(PRODUCTS, product_doc("Cola", "c1")).await.unwrap();
                store.insert(PRODUCTS, product_doc("Water", "c1")).await.unwrap();
                store.insert(PRODUCTS, product_doc("Chips", "c2")).await.unwrap();

                let filter = Filter::eq("parentCategoryId", "c1");
                let found = store.find_where(PRODUCTS, &filter).await.unwrap();
                assert_eq!(names(&found), vec!["Cola", "Water"]);

                let none = Filter::eq("parentCategoryId", "c3");
                assert!(store.find_where(PRODUCTS, &none).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_where_combined_conditions() {
                let store = store().await;
                store.insert(PRODUCTS, product_doc("Cola", "c1")).await.unwrap();
                store.insert(PRODUCTS, product_doc("Water", "c1")).await.unwrap();

                let filter = Filter::eq("parentCategoryId", "c1").and_eq("name", "Water");
                let found = store.find_where(PRODUCTS, &filter).await.unwrap();
                assert_eq!(names(&found), vec!["Water"]);
            }

            // ==================================================================
            // Updates
            // ==================================================================

            #[tokio::test]
            async fn test_update_returns_post_update_document() {
                let store = store().await;
                let created = store.insert(PRODUCTS, product_doc("Cola", "c1")).await.unwrap();
                let id = RecordId::new(id_of(&created));

                let updated = store
                    .update_by_id(PRODUCTS, &id, doc(json!({ "name": "Diet Cola" })))
                    .await
                    .unwrap()
                    .unwrap();

                assert_eq!(updated["name"], "Diet Cola");
                assert_eq!(updated["parentCategoryId"], "c1");
                assert_eq!(id_of(&updated), id.as_str());

                let stored = store.find_by_id(PRODUCTS, &id).await.unwrap().unwrap();
                assert_eq!(stored, updated);
            }

            #[tokio::test]
            async fn test_update_missing_returns_none() {
                let store = store().await;
                let missing = RecordId::new("5f0000000000000000000000");
                let result = store
                    .update_by_id(PRODUCTS, &missing, doc(json!({ "name": "x" })))
                    .await
                    .unwrap();
                assert!(result.is_none());
                assert!(store.find_all(PRODUCTS).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_increment_adds_delta() {
                let store = store().await;
                let created = store.insert(COUNTERS, counter_doc(5)).await.unwrap();
                let id = RecordId::new(id_of(&created));

                let once = store.increment_by_id(COUNTERS, &id, "number", 1).await.unwrap();
                let once = once.unwrap();
                assert_eq!(once["number"], 6);

                let back = store.increment_by_id(COUNTERS, &id, "number", -10).await.unwrap();
                let back = back.unwrap();
                assert_eq!(back["number"], -4);
            }

            #[tokio::test]
            async fn test_increment_missing_returns_none() {
                let store = store().await;
                let missing = RecordId::new("5f0000000000000000000000");
                let result = store.increment_by_id(COUNTERS, &missing, "number", 1).await.unwrap();
                assert!(result.is_none());
            }

            /// Increments from parallel tasks must not lose updates.
            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_increments() {
                let store = store().await;
                let created = store.insert(COUNTERS, counter_doc(0)).await.unwrap();
                let id = RecordId::new(id_of(&created));

                let handles: Vec<_> = (0..10)
                    .map(|_| {
                        let store = store.clone();
                        let id = id.clone();
                        tokio::spawn(async move {
                            store.increment_by_id(COUNTERS, &id, "number", 1).await
                        })
                    })
                    .collect();

                let results = tokio::time::timeout(
                    std::time::Duration::from_secs(30),
                    futures::future::join_all(handles),
                )
                .await
                .expect("Concurrent increments timed out after 30s");
                for result in results {
                    result.unwrap().unwrap();
                }

                let stored = store.find_by_id(COUNTERS, &id).await.unwrap().unwrap();
                assert_eq!(stored["number"], 10);
            }

            // ==================================================================
            // Deletes
            // ==================================================================

            #[tokio::test]
            async fn test_delete_returns_removed_document() {
                let store = store().await;
                let created = store.insert(CATEGORIES, category_doc("Drinks")).await.unwrap();
                let id = RecordId::new(id_of(&created));

                let deleted = store.delete_by_id(CATEGORIES, &id).await.unwrap().unwrap();
                assert_eq!(deleted, created);
                assert!(store.find_by_id(CATEGORIES, &id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_missing_returns_none() {
                let store = store().await;
                let missing = RecordId::new("5f0000000000000000000000");
                assert!(store.delete_by_id(CATEGORIES, &missing).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_where_counts_and_keeps_others() {
                let store = store().await;
                store.insert(PRODUCTS, product_doc("Cola", "c1")).await.unwrap();
                store.insert(PRODUCTS, product_doc("Water", "c1")).await.unwrap();
                store.insert(PRODUCTS, product_doc("Chips", "c2")).await.unwrap();

                let removed = store
                    .delete_where(PRODUCTS, &Filter::eq("parentCategoryId", "c1"))
                    .await
                    .unwrap();
                assert_eq!(removed, 2);

                let left = store.find_all(PRODUCTS).await.unwrap();
                assert_eq!(names(&left), vec!["Chips"]);
            }

            #[tokio::test]
            async fn test_delete_where_no_match() {
                let store = store().await;
                store.insert(PRODUCTS, product_doc("Cola", "c1")).await.unwrap();

                let removed = store
                    .delete_where(PRODUCTS, &Filter::eq("parentCategoryId", "c9"))
                    .await
                    .unwrap();
                assert_eq!(removed, 0);
                assert_eq!(store.find_all(PRODUCTS).await.unwrap().len(), 1);
            }
        }
    };
}
