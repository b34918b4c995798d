//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// HTTP listener and exposure settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind (overridden by the `PORT` environment variable)
    pub port: u16,

    /// Path of the GraphQL endpoint
    pub graphql_path: String,

    /// Serve the GraphiQL IDE on `GET {graphql_path}`
    pub graphiql: bool,

    /// Optional directory of static assets; unknown paths fall back to its
    /// `index.html`
    pub static_dir: Option<PathBuf>,

    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8091,
            graphql_path: "/BeMyGuest".to_string(),
            graphiql: true,
            static_dir: None,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener (e.g., "0.0.0.0:8091")
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which document store backs the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Document store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Connection string (MongoDB only, overridden by `CATALOG_MONGODB_URI`)
    pub uri: Option<String>,

    /// Database name (MongoDB only)
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: None,
            database: "main".to_string(),
        }
    }
}

/// Ids of singleton records, registered by name at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// Id of the counter incremented by `updateCounter`
    ///
    /// When absent, a counter starting at 0 is created at startup and its
    /// id registered instead.
    pub counter: Option<String>,
}

/// Complete configuration of the catalog service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub singletons: SingletonConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`
    ///
    /// Recognized keys: `PORT`, `CATALOG_MONGODB_URI`.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }
        if let Some(uri) = lookup("CATALOG_MONGODB_URI") {
            self.storage.uri = Some(uri);
        }
        Ok(self)
    }
}
