//! In-memory storefront for crawler tests

use crate::config::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, StorefrontConfig, UserAgentConfig,
};
use crate::crawler::fetcher::PageSource;
use crate::HarvestError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

pub const BASE: &str = "http://shop.test/";

/// Serves scripted bodies by exact URL and records every request
///
/// Unknown URLs answer with a 404 transport error.
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Number of requests whose URL starts with `prefix`
    pub fn fetch_count(&self, prefix: &str) -> usize {
        self.fetched
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| HarvestError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn test_selectors() -> SelectorConfig {
    SelectorConfig {
        category_options: "select[name=categories_id] > option".to_string(),
        listing_row: ".productListing-even, .productListing-odd".to_string(),
        row_anchor: ".productListing-pic > a".to_string(),
        row_price: ".productListing-data > b".to_string(),
        upper_bound: "#counters > b.upper".to_string(),
        total_elements: "#counters > b.total".to_string(),
        detail_image: "#details td.image a".to_string(),
        detail_description: "#details td.body".to_string(),
        detail_description_child: 1,
    }
}

pub fn test_config() -> Config {
    Config {
        storefront: StorefrontConfig {
            base_url: BASE.to_string(),
            search_path: "advanced_search.php".to_string(),
            listing_path: "index.php".to_string(),
            detail_path: "product_info.php".to_string(),
        },
        crawler: CrawlerConfig::default(),
        user_agent: UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        },
        output: OutputConfig::default(),
        selectors: test_selectors(),
    }
}

pub fn search_url() -> String {
    format!("{}advanced_search.php", BASE)
}

pub fn listing_url(category_id: u32, page: u32) -> String {
    format!("{}index.php?cPath={}&page={}", BASE, category_id, page)
}

pub fn detail_url(category_id: u32, product_id: &str) -> String {
    format!(
        "{}product_info.php?cPath={}&products_id={}",
        BASE, category_id, product_id
    )
}

pub fn search_body(options: &[(&str, &str)]) -> String {
    let options: String = options
        .iter()
        .map(|(value, label)| format!(r#"<option value="{}">{}</option>"#, value, label))
        .collect();
    format!(
        r#"<html><body><form><select name="categories_id">{}</select></form></body></html>"#,
        options
    )
}

pub fn listing_body(rows: &str, counters: &str) -> String {
    format!(
        r#"<html><body><table>{}</table><div id="counters">{}</div></body></html>"#,
        rows, counters
    )
}

pub fn counters(upper: u32, total: u32) -> String {
    format!(
        r#"<b class="upper">{}</b><b class="total">{}</b>"#,
        upper, total
    )
}

pub fn row(class: &str, id: &str, name: &str, price: &str) -> String {
    format!(
        r#"<tr class="{}"><td class="productListing-pic"><a href="http://shop.example.com/product_info.php?cPath=3&amp;products_id={}">{}</a></td><td class="productListing-data"><b>{}</b></td></tr>"#,
        class, id, name, price
    )
}

pub fn detail_body(image: &str, description: &str) -> String {
    format!(
        r#"<html><body><table id="details"><tr><td class="image"><a href="{}"><img src="thumb.jpg"></a></td><td class="body"><h1>Name</h1><p>{}</p></td></tr></table></body></html>"#,
        image, description
    )
}
