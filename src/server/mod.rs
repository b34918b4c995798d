//! Server module: builder, host, router and the GraphQL exposure
//!
//! `ServerBuilder` opens the store, registers the counter singleton and
//! produces either a `ServerHost` or a ready-to-serve axum `Router`.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::{CatalogSchema, GraphQLExposure};
pub use host::ServerHost;
