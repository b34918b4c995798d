//! GraphQL API exposure for the catalog
//!
//! Serves the executable schema over HTTP: `POST` on the configured path
//! executes queries and mutations, and `GET` on the same path answers the
//! GraphiQL explorer when it is enabled.

mod args;
mod mutation_root;
mod query_root;
mod schema;
mod types;

pub use schema::CatalogSchema;

use crate::server::host::ServerHost;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::post,
};
use std::sync::Arc;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let host = Arc::new(builder.build_host().await?);
    /// let graphql_app = GraphQLExposure::build_router(host);
    /// ```
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let path = host.config.server.graphql_path.clone();
        let mut route = post(graphql_handler);
        if host.config.server.graphiql {
            route = route.get(graphiql);
        }
        Router::new().route(&path, route).with_state(host)
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    State(host): State<Arc<ServerHost>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    host.schema.execute(request.into_inner()).await.into()
}

/// Handler for the GraphiQL explorer
async fn graphiql(State(host): State<Arc<ServerHost>>) -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(&host.config.server.graphql_path)
            .finish(),
    )
}
