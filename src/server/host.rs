//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything an exposure needs to serve the catalog:
//! the loaded configuration, the catalog service and the schema built on top
//! of it. It knows nothing about HTTP.

use crate::config::AppConfig;
use crate::core::service::CatalogService;
use crate::server::exposure::CatalogSchema;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(config, service)?;
/// let app = GraphQLExposure::build_router(Arc::new(host));
/// ```
pub struct ServerHost {
    /// Effective configuration (file plus environment overrides)
    pub config: Arc<AppConfig>,

    /// Catalog operations shared with the schema
    pub service: CatalogService,

    /// Executable GraphQL schema
    pub schema: CatalogSchema,
}

impl ServerHost {
    /// Build the host and its schema
    pub fn new(config: AppConfig, service: CatalogService) -> Result<Self> {
        let schema = CatalogSchema::build(service.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build GraphQL schema: {}", e))?;

        Ok(Self {
            config: Arc::new(config),
            service,
            schema,
        })
    }
}
