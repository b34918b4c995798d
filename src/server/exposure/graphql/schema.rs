//! Catalog schema assembly and execution
//!
//! The schema is built once per host from the dynamic object definitions in
//! [`types`](super::types), [`query_root`](super::query_root) and
//! [`mutation_root`](super::mutation_root), with the [`CatalogService`]
//! attached as context data for every resolver.

use async_graphql::dynamic::{Schema, SchemaError};
use async_graphql::{ErrorExtensionValues, Request, Response, Value};

use super::mutation_root::{MUTATION, mutation_root};
use super::query_root::{QUERY, query_root};
use super::types;
use crate::core::error::ErrorKind;
use crate::core::service::CatalogService;

/// Executable catalog schema
#[derive(Clone)]
pub struct CatalogSchema {
    schema: Schema,
}

impl CatalogSchema {
    pub fn build(service: CatalogService) -> Result<Self, SchemaError> {
        let mut builder = Schema::build(QUERY, Some(MUTATION), None)
            .register(query_root())
            .register(mutation_root());
        for object in types::entity_types() {
            builder = builder.register(object);
        }
        let schema = builder.data(service).finish()?;
        Ok(Self { schema })
    }

    /// Execute one request against the catalog
    ///
    /// Errors raised by the engine itself (parse failures, unknown fields,
    /// missing or mistyped arguments) carry no path and no extensions; they
    /// are tagged `VALIDATION_ERROR` here so every error in a response has a
    /// code.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let mut response = self.schema.execute(request.into()).await;
        tag_request_errors(&mut response);
        response
    }

    /// Schema in SDL form
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

fn tag_request_errors(response: &mut Response) {
    for error in &mut response.errors {
        if error.path.is_empty() && error.extensions.is_none() {
            let mut extensions = ErrorExtensionValues::default();
            extensions.set("code", Value::from(ErrorKind::Validation.code()));
            error.extensions = Some(extensions);
        }
    }
}
