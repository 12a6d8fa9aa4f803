//! Client for the catalog's paginated search endpoint.
//!
//! Provides the request/response wire types, the [`CatalogTransport`]
//! seam the listing controller is written against, and [`CatalogApi`],
//! its HTTP implementation over [`reqwest`].

pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;

pub use api::CatalogApi;
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use query::{SearchPage, SearchRequest};
pub use transport::CatalogTransport;
