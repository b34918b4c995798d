//! Core module containing the catalog records, errors and store contract

pub mod entity;
pub mod error;
pub mod service;
pub mod singleton;
pub mod store;

pub use entity::{Category, Counter, Product, Record, RecordId, TimeRecord};
pub use error::{CatalogError, ErrorKind, StorageError};
pub use service::{CatalogService, ProductPatch};
pub use singleton::SingletonRegistry;
pub use store::{Document, DocumentStore, Filter};
