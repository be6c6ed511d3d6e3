//! Crawler coordinator - main harvest orchestration logic
//!
//! This module contains the top-level run that:
//! - Resolves the leaf categories once
//! - Crawls every category in its own task, bounded by a semaphore
//! - Publishes each category's result into an outcome it alone owns
//! - Reports per-category counts and the elapsed time

use crate::catalog::{Category, Product, ProductSet};
use crate::config::Config;
use crate::crawler::categories::CategoryResolver;
use crate::crawler::context::CrawlContext;
use crate::crawler::fetcher::{HttpPageSource, PageSource};
use crate::crawler::listing::ListingPaginator;
use crate::state::CategoryStatus;
use crate::HarvestError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// The crawl result of one category
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub category: Arc<Category>,
    pub products: ProductSet,
    pub pages_fetched: u32,
    pub status: CategoryStatus,
}

/// Everything a harvest collected
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    /// One report per resolved category, ordered by category id
    pub reports: Vec<CategoryReport>,

    /// Wall time of the whole run
    pub elapsed: Duration,
}

impl HarvestOutcome {
    /// Total number of products over all categories
    pub fn product_count(&self) -> usize {
        self.reports.iter().map(|r| r.products.len()).sum()
    }

    /// All products, ordered by category id then product id
    pub fn products(&self) -> Vec<&Product> {
        self.reports
            .iter()
            .flat_map(|r| r.products.to_sorted_vec())
            .collect()
    }

    /// The report of a category, by id
    pub fn report(&self, category_id: u32) -> Option<&CategoryReport> {
        self.reports.iter().find(|r| r.category.id == category_id)
    }

    /// Consumes the outcome into a category → products mapping
    pub fn into_mapping(self) -> HashMap<Arc<Category>, ProductSet> {
        self.reports
            .into_iter()
            .map(|r| (r.category, r.products))
            .collect()
    }
}

/// Main harvest coordinator
pub struct Harvester {
    context: Arc<CrawlContext>,
    max_concurrent_categories: usize,
}

impl Harvester {
    /// Creates a harvester that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - The HTTP client, URLs or locators could not be built
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let source = Arc::new(HttpPageSource::new(config)?);
        Self::with_source(config, source)
    }

    /// Creates a harvester around any page source
    pub fn with_source(config: &Config, source: Arc<dyn PageSource>) -> Result<Self, HarvestError> {
        Ok(Self {
            context: Arc::new(CrawlContext::new(config, source)?),
            max_concurrent_categories: config.crawler.max_concurrent_categories as usize,
        })
    }

    /// Resolves the leaf categories without crawling them
    pub async fn resolve_categories(&self) -> Result<Vec<Category>, HarvestError> {
        CategoryResolver::new(self.context.clone()).resolve().await
    }

    /// Runs the complete harvest
    ///
    /// 1. Resolve categories (a failure aborts the run)
    /// 2. Spawn one task per category, at most `max-concurrent-categories` at a time
    /// 3. Join every task; a failed or panicked task becomes a `Failed` report
    /// 4. Log per-category counts and the elapsed time
    pub async fn run(&self) -> Result<HarvestOutcome, HarvestError> {
        let start_time = Instant::now();

        let categories = self.resolve_categories().await?;
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_categories));

        let mut handles = Vec::with_capacity(categories.len());
        for category in categories {
            let category = Arc::new(category);
            let task_category = category.clone();
            let context = self.context.clone();
            let semaphore = semaphore.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| HarvestError::Task(e.to_string()))?;
                ListingPaginator::new(context)
                    .fetch_products(&task_category)
                    .await
            });
            handles.push((category, handle));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (category, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(HarvestError::Task(e.to_string())),
            };

            let report = match result {
                Ok(crawl) => {
                    tracing::info!(
                        "Added {} products to {} ({} pages, {})",
                        crawl.products.len(),
                        category.name,
                        crawl.pages_fetched,
                        crawl.status
                    );
                    CategoryReport {
                        category,
                        products: crawl.products,
                        pages_fetched: crawl.pages_fetched,
                        status: crawl.status,
                    }
                }
                Err(e) => {
                    tracing::error!("Category {} failed: {}", category, e);
                    CategoryReport {
                        products: ProductSet::new(self.context.dedup),
                        category,
                        pages_fetched: 0,
                        status: CategoryStatus::Failed {
                            reason: e.to_string(),
                        },
                    }
                }
            };
            reports.push(report);
        }

        reports.sort_by(|a, b| a.category.cmp(&b.category));

        let outcome = HarvestOutcome {
            reports,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Harvested {} products from {} categories of {} in {:?}",
            outcome.product_count(),
            outcome.reports.len(),
            self.context.endpoints.base(),
            outcome.elapsed
        );

        Ok(outcome)
    }
}

/// Runs a complete harvest over HTTP
///
/// # Example
///
/// ```no_run
/// use shelf_crawler::config::load_config;
/// use shelf_crawler::crawler::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("shelf.toml"))?;
/// let outcome = run_harvest(&config).await?;
/// println!("{} products", outcome.product_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config) -> Result<HarvestOutcome, HarvestError> {
    Harvester::new(config)?.run().await
}
