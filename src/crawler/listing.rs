//! Listing pagination
//!
//! Walks the paginated listing of one category. Pages are fetched while the
//! page's upper-bound counter stays below its total-elements counter. Each
//! row is enriched from its detail page before it joins the result set.

use crate::catalog::{Category, Product, ProductSet};
use crate::crawler::context::CrawlContext;
use crate::crawler::details::DetailEnricher;
use crate::crawler::parser::parse_listing_page;
use crate::state::CategoryStatus;
use crate::HarvestError;
use std::sync::Arc;

/// The products collected for one category and how the walk ended
#[derive(Debug, Clone)]
pub struct CategoryCrawl {
    pub products: ProductSet,
    pub pages_fetched: u32,
    pub status: CategoryStatus,
}

/// Crawls the listing pages of a category
pub struct ListingPaginator {
    context: Arc<CrawlContext>,
    enricher: DetailEnricher,
}

impl ListingPaginator {
    pub fn new(context: Arc<CrawlContext>) -> Self {
        let enricher = DetailEnricher::new(context.clone());
        Self { context, enricher }
    }

    /// Collects every product listed under the category
    ///
    /// # Page Loop
    ///
    /// 1. Stop with `PageLimitReached` once the page ceiling is passed
    /// 2. Fetch the page; on page 1, no counters at all means an empty category
    /// 3. Extract rows in document order; a broken row is logged and skipped
    /// 4. Enrich each row from its detail page, then insert it
    /// 5. Continue while `upper bound < total elements`; a missing or
    ///    non-numeric counter ends the walk
    ///
    /// # Errors
    ///
    /// A transport error on any listing page fails the whole category.
    pub async fn fetch_products(
        &self,
        category: &Arc<Category>,
    ) -> Result<CategoryCrawl, HarvestError> {
        let mut products = ProductSet::new(self.context.dedup);
        let mut page_number: u32 = 1;
        let mut pages_fetched: u32 = 0;

        let status = loop {
            if page_number > self.context.max_pages_per_category {
                tracing::warn!(
                    "Category {} exceeded {} listing pages, stopping",
                    category,
                    self.context.max_pages_per_category
                );
                break CategoryStatus::PageLimitReached {
                    limit: self.context.max_pages_per_category,
                };
            }

            let url = self.context.endpoints.listing(category.id, page_number)?;
            tracing::debug!("Fetching {}", url);

            let body = self.context.source.fetch(&url).await?;
            pages_fetched += 1;

            let listing = parse_listing_page(&body, &self.context.locators);

            if page_number == 1 && listing.counters_absent() {
                tracing::info!("No products found for {}, skipping", category);
                break CategoryStatus::Empty;
            }

            for (index, row) in listing.rows.iter().enumerate() {
                let row = match row {
                    Ok(row) => row,
                    Err(e) => {
                        tracing::warn!(
                            "Skipping row {} of {} page {}: {}",
                            index + 1,
                            category,
                            page_number,
                            e
                        );
                        continue;
                    }
                };

                let stub = Product::new(
                    row.product_id.clone(),
                    row.name.clone(),
                    category.clone(),
                    row.price,
                );
                let product = self.enricher.enrich(stub).await;
                tracing::trace!("Collected {}", product);
                products.insert(product);
            }

            match listing.bounds() {
                Some((upper, total)) if upper < total => {
                    tracing::debug!(
                        "{}: showing up to {} of {}, next page",
                        category,
                        upper,
                        total
                    );
                    page_number += 1;
                }
                Some(_) => break CategoryStatus::Complete,
                None => {
                    tracing::warn!(
                        "Result counters missing on page {} of {}, treating it as the last page",
                        page_number,
                        category
                    );
                    break CategoryStatus::Complete;
                }
            }
        };

        Ok(CategoryCrawl {
            products,
            pages_fetched,
            status,
        })
    }
}
