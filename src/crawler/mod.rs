//! Crawler module for storefront harvesting
//!
//! This module contains the core crawling logic, including:
//! - Page fetching behind the [`PageSource`] capability
//! - Parsing of search, listing and detail pages
//! - Category resolution and listing pagination
//! - Detail enrichment and overall harvest coordination

mod categories;
mod context;
mod coordinator;
mod details;
mod fetcher;
mod listing;
mod parser;

#[cfg(test)]
pub(crate) mod testing;

pub use categories::CategoryResolver;
pub use context::CrawlContext;
pub use coordinator::{run_harvest, CategoryReport, HarvestOutcome, Harvester};
pub use details::DetailEnricher;
pub use fetcher::{build_http_client, user_agent_string, HttpPageSource, PageSource};
pub use listing::{CategoryCrawl, ListingPaginator};
pub use parser::{
    indentation_depth, is_leaf, leaf_categories, parse_category_options, parse_listing_page,
    parse_product_details, CategoryOption, ListingPage, ListingRow, Locators, ProductDetails,
    RowError,
};
