//! Shared crawl context

use crate::catalog::DedupStrategy;
use crate::config::Config;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::Locators;
use crate::url::Endpoints;
use crate::HarvestError;
use std::sync::Arc;

/// Immutable state shared by every category task
pub struct CrawlContext {
    pub source: Arc<dyn PageSource>,
    pub endpoints: Endpoints,
    pub locators: Locators,
    pub max_pages_per_category: u32,
    pub dedup: DedupStrategy,
}

impl CrawlContext {
    /// Compiles the configuration into a context around a page source
    pub fn new(config: &Config, source: Arc<dyn PageSource>) -> Result<Self, HarvestError> {
        Ok(Self {
            source,
            endpoints: Endpoints::new(&config.storefront)?,
            locators: Locators::from_config(&config.selectors)?,
            max_pages_per_category: config.crawler.max_pages_per_category,
            dedup: config.crawler.dedup,
        })
    }
}
