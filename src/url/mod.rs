//! URL handling module for Shelf-Crawler
//!
//! This module builds the storefront page URLs and decodes the query strings
//! found in listing-row links.

mod endpoints;
mod query;

// Re-export main functions
pub use endpoints::Endpoints;
pub use query::{parse_query, query_of, QueryParams};
