//! GraphQL client for a Saleor-style product catalog.

pub mod client;
pub mod error;
mod queries;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{FieldError, GraphQLError, ProductDetail};
