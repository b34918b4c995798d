//! Router assembly: GraphQL routes plus the HTTP layers around them

use super::exposure::GraphQLExposure;
use super::host::ServerHost;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the complete application router for a host
///
/// - `POST {graphql_path}` executes GraphQL
/// - `GET {graphql_path}` serves GraphiQL (when enabled)
/// - every other path is served from `static_dir` (when configured), with
///   `index.html` answering paths that match no file
pub fn build_router(host: Arc<ServerHost>) -> Router {
    let server = &host.config.server;
    let static_dir = server.static_dir.clone();
    let cors = server.cors;

    let mut router = GraphQLExposure::build_router(host.clone());

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router = router.layer(TraceLayer::new_for_http());
    if cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}
