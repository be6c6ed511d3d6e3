//! Shelf-Crawler: a storefront catalog harvester
//!
//! This crate crawls the category tree of an osCommerce-style storefront,
//! walks every leaf category's paginated listing, enriches each product from
//! its detail page and writes the collected records as delimited text.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod markup;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Crawler operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid locator '{locator}': {message}")]
    Locator { locator: String, message: String },

    #[error("Invalid category id '{value}': {source}")]
    InvalidCategoryId {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("Category task failed: {0}")]
    Task(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Query-string decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Segment '{0}' has no '=' separator")]
    MissingSeparator(String),

    #[error("Cannot decode '{input}': {reason}")]
    Decode { input: String, reason: String },
}

/// Result type alias for Shelf-Crawler operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Category, DedupStrategy, Price, Product, ProductSet};
pub use config::Config;
pub use crawler::{Harvester, HarvestOutcome};
pub use state::CategoryStatus;
