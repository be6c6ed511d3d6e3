//! Product detail enrichment

use crate::catalog::Product;
use crate::crawler::context::CrawlContext;
use crate::crawler::parser::parse_product_details;
use std::sync::Arc;

/// Fills the optional product fields from the detail page
#[derive(Clone)]
pub struct DetailEnricher {
    context: Arc<CrawlContext>,
}

impl DetailEnricher {
    pub fn new(context: Arc<CrawlContext>) -> Self {
        Self { context }
    }

    /// Returns the product with its image link and description filled in
    ///
    /// Missing fields stay empty. A failed fetch is logged and the product is
    /// returned unchanged; enrichment never drops a product.
    pub async fn enrich(&self, mut product: Product) -> Product {
        let url = match self
            .context
            .endpoints
            .detail(product.category.id, &product.id)
        {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("No detail URL for product {}: {}", product.id, e);
                return product;
            }
        };

        let body = match self.context.source.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch details of product {}: {}", product.id, e);
                return product;
            }
        };

        let details = parse_product_details(&body, &self.context.locators);
        if let Some(image_src) = details.image_src {
            product.image_src = image_src;
        }
        if let Some(description) = details.description {
            product.description = description;
        }

        if !product.is_enriched() {
            tracing::debug!("Detail page of product {} had no optional fields", product.id);
        }

        product
    }
}
