use crate::catalog::DedupStrategy;
use serde::Deserialize;

/// Main configuration structure for Shelf-Crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Where the storefront lives and which scripts serve its pages
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// Root URL of the shop, e.g. `http://www.example-shop.pl`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page carrying the category selector
    #[serde(rename = "search-path", default = "default_search_path")]
    pub search_path: String,

    /// Paginated category listing, called with `cPath` and `page`
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Product detail page, called with `cPath` and `products_id`
    #[serde(rename = "detail-path", default = "default_detail_path")]
    pub detail_path: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of categories crawled at the same time
    #[serde(
        rename = "max-concurrent-categories",
        default = "default_max_concurrent_categories"
    )]
    pub max_concurrent_categories: u32,

    /// Listing pages fetched per category before giving up on the bound
    #[serde(
        rename = "max-pages-per-category",
        default = "default_max_pages_per_category"
    )]
    pub max_pages_per_category: u32,

    /// Timeout for a single HTTP request (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// How repeated sightings of a product collapse
    #[serde(default)]
    pub dedup: DedupStrategy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_categories: default_max_concurrent_categories(),
            max_pages_per_category: default_max_pages_per_category(),
            request_timeout_secs: default_request_timeout_secs(),
            dedup: DedupStrategy::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the record files
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File name prefix, followed by a timestamp
    #[serde(rename = "file-prefix", default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}

/// CSS locators for the storefront's page templates
///
/// Defaults match the stock osCommerce 2.2 templates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// `<option>` nodes of the category selector on the search page
    pub category_options: String,

    /// Product rows of a listing page (both row styles)
    pub listing_row: String,

    /// Anchor inside a row whose href carries `products_id`
    pub row_anchor: String,

    /// Element inside a row holding the price text
    pub row_price: String,

    /// Counter with the index of the last product shown on the page
    pub upper_bound: String,

    /// Counter with the number of products in the category
    pub total_elements: String,

    /// Anchor on the detail page linking the product image
    pub detail_image: String,

    /// Container on the detail page holding the description
    pub detail_description: String,

    /// 0-based element child of the container that is the description
    pub detail_description_child: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let counters = "#contentLT > table > tbody > tr:nth-child(4) > td > table:nth-child(3) > tbody > tr > td:nth-child(1)";
        Self {
            category_options: "#contentLT > form > table > tbody > tr:nth-child(7) > td > table > tbody > tr > td > table > tbody > tr:nth-child(1) > td.fieldValue > select > option".to_string(),
            listing_row: ".productListing-even, .productListing-odd".to_string(),
            row_anchor: "#productListing-pic > a".to_string(),
            row_price: ".productListing-data > b".to_string(),
            upper_bound: format!("{} > b:nth-child(2)", counters),
            total_elements: format!("{} > b:nth-child(3)", counters),
            detail_image: "#contentLT form table tbody tr:nth-child(3) td table tbody tr td a"
                .to_string(),
            detail_description: "#contentLT > form > table > tbody > tr:nth-child(3) > td"
                .to_string(),
            detail_description_child: 6,
        }
    }
}

fn default_search_path() -> String {
    "advanced_search.php".to_string()
}

fn default_listing_path() -> String {
    "index.php".to_string()
}

fn default_detail_path() -> String {
    "product_info.php".to_string()
}

fn default_max_concurrent_categories() -> u32 {
    8
}

fn default_max_pages_per_category() -> u32 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_directory() -> String {
    "outputs".to_string()
}

fn default_file_prefix() -> String {
    "products".to_string()
}
