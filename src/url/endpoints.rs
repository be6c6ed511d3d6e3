//! Storefront page URLs

use crate::config::StorefrontConfig;
use crate::HarvestError;
use url::Url;

/// Builds the storefront URLs the crawler fetches
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    search_path: String,
    listing_path: String,
    detail_path: String,
}

impl Endpoints {
    /// Creates the endpoint set for a storefront
    ///
    /// The base URL is treated as a directory, so `http://host/shop` and
    /// `http://host/shop/` resolve pages the same way.
    pub fn new(config: &StorefrontConfig) -> Result<Self, HarvestError> {
        let mut base = Url::parse(&config.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            search_path: config.search_path.clone(),
            listing_path: config.listing_path.clone(),
            detail_path: config.detail_path.clone(),
        })
    }

    /// The storefront root
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The page carrying the category selector
    pub fn search(&self) -> Result<Url, HarvestError> {
        Ok(self.base.join(&self.search_path)?)
    }

    /// One page of a category listing (pages start at 1)
    pub fn listing(&self, category_id: u32, page: u32) -> Result<Url, HarvestError> {
        let mut url = self.base.join(&self.listing_path)?;
        url.query_pairs_mut()
            .append_pair("cPath", &category_id.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// The detail page of a product within its category
    pub fn detail(&self, category_id: u32, product_id: &str) -> Result<Url, HarvestError> {
        let mut url = self.base.join(&self.detail_path)?;
        url.query_pairs_mut()
            .append_pair("cPath", &category_id.to_string())
            .append_pair("products_id", product_id);
        Ok(url)
    }
}
