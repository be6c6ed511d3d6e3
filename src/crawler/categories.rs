//! Category resolution
//!
//! Reads the category selector of the search page and keeps the leaf
//! categories, the ones whose listings hold products directly.

use crate::catalog::Category;
use crate::crawler::context::CrawlContext;
use crate::crawler::parser::{leaf_categories, parse_category_options};
use crate::HarvestError;
use std::sync::Arc;

/// Resolves the set of leaf categories to crawl
pub struct CategoryResolver {
    context: Arc<CrawlContext>,
}

impl CategoryResolver {
    pub fn new(context: Arc<CrawlContext>) -> Self {
        Self { context }
    }

    /// Fetches the search page and returns its leaf categories
    ///
    /// Categories come back in selector order without duplicates.
    ///
    /// # Errors
    ///
    /// A transport error or a malformed category id fails the whole resolve.
    pub async fn resolve(&self) -> Result<Vec<Category>, HarvestError> {
        let url = self.context.endpoints.search()?;
        tracing::info!("Resolving categories from {}", url);

        let body = self.context.source.fetch(&url).await?;
        let options = parse_category_options(&body, &self.context.locators);
        let categories = leaf_categories(&options)?;

        tracing::info!(
            "Resolved {} leaf categories out of {} options",
            categories.len(),
            options.len()
        );
        for category in &categories {
            tracing::debug!("Leaf category: {}", category);
        }

        Ok(categories)
    }
}
