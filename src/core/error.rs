//! Typed error handling for the catalog
//!
//! Every failure a resolver can surface falls into one of three kinds, and
//! callers branch on the kind rather than on message text:
//!
//! - [`ErrorKind::NotFound`]: the target of an update/delete does not exist
//!   (this includes the counter singleton)
//! - [`ErrorKind::Validation`]: an argument was missing or unusable
//! - [`ErrorKind::Storage`]: the document store call itself failed
//!
//! Over GraphQL the kind is carried in `extensions.code` of the error
//! attached to the failing field.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.update_category(&id, "Snacks").await {
//!     Ok(category) => println!("renamed {}", category.id),
//!     Err(e) if e.kind() == ErrorKind::NotFound => println!("no such category"),
//!     Err(e) => return Err(e),
//! }
//! ```

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Coarse classification exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
}

impl ErrorKind {
    /// Code placed in the GraphQL error's `extensions.code`
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors returned by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record matched the id of an update or delete
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A singleton was never registered at initialization
    #[error("{entity} singleton '{name}' is not registered")]
    SingletonMissing { entity: &'static str, name: String },

    /// An argument was rejected before touching the store
    #[error("Invalid argument '{argument}': {message}")]
    Validation { argument: String, message: String },

    /// The document store failed; the message is passed through as-is
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound { .. } | CatalogError::SingletonMissing { .. } => {
                ErrorKind::NotFound
            }
            CatalogError::Validation { .. } => ErrorKind::Validation,
            CatalogError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl ErrorExtensions for CatalogError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.kind().code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by [`DocumentStore`](crate::core::store::DocumentStore) backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the backend
    #[error("Failed to connect to {backend}: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    /// The backend rejected or failed a call
    #[error("{backend} query error: {message}")]
    Query {
        backend: &'static str,
        message: String,
    },

    /// A stored document could not be decoded into its record type
    #[error("Malformed document in '{collection}': {message}")]
    Malformed { collection: String, message: String },
}

impl StorageError {
    pub fn query(backend: &'static str, message: impl ToString) -> Self {
        StorageError::Query {
            backend,
            message: message.to_string(),
        }
    }
}
