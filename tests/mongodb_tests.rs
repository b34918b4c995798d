//! Integration tests for the MongoDB store using the store test harness.
//!
//! Invokes `document_store_tests!` against `MongoStore`, then runs the
//! catalog cascade end to end on the same backend.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container)
//! - Feature flag `mongodb_backend` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features mongodb_backend --test mongodb_tests
//! ```
//!
//! # Test isolation
//!
//! All tests share a single MongoDB container (via `OnceCell`). Each test
//! gets its own database.

#![cfg(feature = "mongodb_backend")]

#[macro_use]
mod store_harness;

use catalog::core::service::CatalogService;
use catalog::core::singleton::SingletonRegistry;
use catalog::storage::MongoStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use store_harness::*;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::sync::OnceCell;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh database per test)
// ---------------------------------------------------------------------------

/// Holds the testcontainer handle (keeps it alive) and the connection URL.
struct MongoTestEnv {
    /// Container handle; dropping this stops the MongoDB container.
    _container: testcontainers::ContainerAsync<Mongo>,
    connection_url: String,
}

static TEST_ENV: OnceCell<MongoTestEnv> = OnceCell::const_new();

async fn init_mongo_env() -> &'static MongoTestEnv {
    TEST_ENV
        .get_or_init(|| async {
            let container = Mongo::default()
                .start()
                .await
                .expect("Failed to start MongoDB container, is Docker running?");

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(27017).await.unwrap();

            MongoTestEnv {
                _container: container,
                connection_url: format!("mongodb://{}:{}", host, port),
            }
        })
        .await
}

/// Atomic counter to generate unique database names per test.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Connect a `MongoStore` to a database no other test uses.
async fn fresh_mongo_store() -> MongoStore {
    let env = init_mongo_env().await;
    let db_num = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let store = MongoStore::connect(&env.connection_url, &format!("catalog_test_{}", db_num))
        .await
        .expect("Failed to connect to MongoDB");
    store.ensure_indexes().await.expect("Failed to create indexes");
    store
}

// ---------------------------------------------------------------------------
// Test suites via macros
// ---------------------------------------------------------------------------

document_store_tests!(fresh_mongo_store().await);

// ---------------------------------------------------------------------------
// Catalog behaviour on MongoDB
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_cascade_delete_on_mongodb() {
    let store = Arc::new(fresh_mongo_store().await);
    let service = CatalogService::new(store, SingletonRegistry::new());

    let drinks = service.create_category("Drinks").await.unwrap();
    let snacks = service.create_category("Snacks").await.unwrap();
    service.create_product("Cola", &drinks.id).await.unwrap();
    service.create_product("Water", &drinks.id).await.unwrap();
    let chips = service.create_product("Chips", &snacks.id).await.unwrap();

    let deleted = service.delete_category(&drinks.id).await.unwrap();
    assert_eq!(deleted.name, "Drinks");

    let products = service.products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, chips.id);
    assert!(service.category(&drinks.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_are_object_id_hex() {
    let store = Arc::new(fresh_mongo_store().await);
    let service = CatalogService::new(store, SingletonRegistry::new());
    let category = service.create_category("Drinks").await.unwrap();

    assert_eq!(category.id.as_str().len(), 24);
    assert!(category.id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
}
