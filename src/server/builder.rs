//! ServerBuilder for fluent API to build the catalog server

use super::host::ServerHost;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::entity::{Counter, Record, RecordId};
use crate::core::service::CatalogService;
use crate::core::singleton::{self, SingletonRegistry};
use crate::core::store::DocumentStore;
use crate::storage;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("catalog.yaml")?)
///     .build()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already opened store instead of connecting from `storage` config
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Opens the store (unless one was supplied), registers the counter
    /// singleton and builds the schema.
    pub async fn build_host(mut self) -> Result<ServerHost> {
        let store = match self.store.take() {
            Some(store) => store,
            None => storage::connect(&self.config.storage).await?,
        };

        let singletons = register_singletons(&self.config, store.clone()).await?;
        let service = CatalogService::new(store, singletons);

        ServerHost::new(self.config, service)
    }

    /// Build the final router
    pub async fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host().await?);
        Ok(build_router(host))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let graphql_path = self.config.server.graphql_path.clone();
        let app = self.build().await?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {} (GraphQL at {})", addr, graphql_path);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the counter singleton id
///
/// A configured id is registered as is, even when no such counter exists
/// yet; `updateCounter` then reports NotFound. Without a configured id the
/// counter lives under the well-known id `counter`: it is created at 0 on
/// first start and reused on every later start against the same store.
async fn register_singletons(
    config: &AppConfig,
    store: Arc<dyn DocumentStore>,
) -> Result<SingletonRegistry> {
    let counter_id = match config.singletons.counter.as_deref() {
        Some(raw) => {
            let id = RecordId::parse("singletons.counter", raw)?;
            if store.find_by_id(Counter::COLLECTION, &id).await?.is_none() {
                tracing::warn!(id = %id, "configured counter singleton does not exist");
            }
            id
        }
        None => {
            let id = RecordId::new(singleton::COUNTER);
            let bootstrap = CatalogService::new(store, SingletonRegistry::new());
            let counter = bootstrap.ensure_counter(&id, 0).await?;
            tracing::info!(id = %counter.id, number = counter.number, "counter singleton ready");
            counter.id
        }
    };

    Ok(SingletonRegistry::new().with(singleton::COUNTER, counter_id))
}


/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
