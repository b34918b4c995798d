//! Catalog GraphQL server
//!
//! Usage: `catalog-server [config.yaml]`
//!
//! The configuration file may also be named by `CATALOG_CONFIG`; without one
//! the defaults apply (in-memory store, port 8091). `PORT` and
//! `CATALOG_MONGODB_URI` override the file.

use anyhow::{Context, Result};
use catalog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CATALOG_CONFIG").ok());

    let config = match config_path {
        Some(path) => AppConfig::from_yaml_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => AppConfig::default(),
    }
    .with_env_overrides()?;

    tracing::info!(
        backend = ?config.storage.backend,
        port = config.server.port,
        "Starting catalog server"
    );

    ServerBuilder::new().with_config(config).serve().await
}
