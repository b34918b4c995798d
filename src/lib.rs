//! # Catalog Graph
//!
//! A GraphQL catalog service over a document store.
//!
//! ## Features
//!
//! - **Categories and Products**: products reference their category by id;
//!   both directions are navigable in queries
//! - **Cascade Delete**: deleting a category removes its products
//! - **Counter Singleton**: `updateCounter` increments one registered counter
//! - **Time Log**: `createTime` appends the current UTC timestamp
//! - **Coded Errors**: every GraphQL error carries `extensions.code`
//!   (`NOT_FOUND`, `VALIDATION_ERROR` or `STORAGE_ERROR`)
//! - **Pluggable Storage**: in-memory by default, MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let config = AppConfig::from_yaml_file("catalog.yaml")?.with_env_overrides()?;
//! ServerBuilder::new().with_config(config).serve().await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CatalogError, CatalogService, Category, Counter, Document, DocumentStore, ErrorKind,
        Filter, Product, ProductPatch, Record, RecordId, SingletonRegistry, StorageError,
        TimeRecord,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config ===
    pub use crate::config::{AppConfig, ServerConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::{CatalogSchema, GraphQLExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
