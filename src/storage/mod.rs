//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::store::DocumentStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the document store selected by configuration
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StorageBackend::InMemory => {
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "mongodb_backend")]
        StorageBackend::Mongodb => {
            let uri = config
                .uri
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("storage.uri is required for the mongodb backend"))?;
            let store = MongoStore::connect(uri, &config.database).await?;
            store.ensure_indexes().await?;
            tracing::info!(database = %config.database, "Connected to MongoDB");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageBackend::Mongodb => anyhow::bail!(
            "MongoDB support is not enabled. Enable the 'mongodb_backend' feature to use it."
        ),
    }
}
