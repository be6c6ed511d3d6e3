//! Storefront page parsers
//!
//! This module turns fetched page bodies into owned values:
//! - The category selector of the search page
//! - Product rows and result counters of a listing page
//! - Optional fields of a product detail page
//!
//! Every function parses synchronously and drops the document before
//! returning, so callers can hold the results across await points.

use crate::catalog::{Category, Price, PriceError};
use crate::config::SelectorConfig;
use crate::markup::{self, Locator, Page};
use crate::url::{parse_query, query_of};
use crate::{HarvestError, QueryError};
use scraper::ElementRef;
use std::collections::HashSet;
use thiserror::Error;

/// Compiled locators for the storefront templates
#[derive(Debug, Clone)]
pub struct Locators {
    pub category_options: Locator,
    pub listing_row: Locator,
    pub row_anchor: Locator,
    pub row_price: Locator,
    pub upper_bound: Locator,
    pub total_elements: Locator,
    pub detail_image: Locator,
    pub detail_description: Locator,
    pub detail_description_child: usize,
}

impl Locators {
    /// Compiles every selector of the configuration
    pub fn from_config(config: &SelectorConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            category_options: Locator::parse(&config.category_options)?,
            listing_row: Locator::parse(&config.listing_row)?,
            row_anchor: Locator::parse(&config.row_anchor)?,
            row_price: Locator::parse(&config.row_price)?,
            upper_bound: Locator::parse(&config.upper_bound)?,
            total_elements: Locator::parse(&config.total_elements)?,
            detail_image: Locator::parse(&config.detail_image)?,
            detail_description: Locator::parse(&config.detail_description)?,
            detail_description_child: config.detail_description_child,
        })
    }
}

// ===== Category selector =====

/// One `<option>` of the category selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// The `value` attribute, empty when absent
    pub value: String,

    /// First child text, with its indentation
    pub label: String,
}

/// Extracts the category options in document order
pub fn parse_category_options(body: &str, locators: &Locators) -> Vec<CategoryOption> {
    let page = Page::parse(body);
    page.select(&locators.category_options)
        .into_iter()
        .map(|option| CategoryOption {
            value: markup::attr(option, "value").unwrap_or_default().to_string(),
            label: markup::leading_text(option).unwrap_or_default(),
        })
        .collect()
}

/// Indentation depth of an option label
///
/// The number of characters before the label's last space, measured over the
/// label as the storefront serialized it (each non-breaking space counts as
/// its `&nbsp;` entity). A label without a space counts in full.
pub fn indentation_depth(label: &str) -> usize {
    let serialized = markup::serialized_text(label);
    let head = serialized
        .rsplit_once(' ')
        .map_or(serialized.as_str(), |(head, _)| head);
    head.chars().count()
}

/// Returns true if the option has no subcategory nested right after it
///
/// The last option is always a leaf. Otherwise an option is a leaf unless the
/// next one is indented deeper.
pub fn is_leaf(option: &CategoryOption, next: Option<&CategoryOption>) -> bool {
    match next {
        None => true,
        Some(next) => indentation_depth(&next.label) <= indentation_depth(&option.label),
    }
}

/// Reduces the flat option list to its leaf categories
///
/// Options with an empty value are skipped but still count as the "next"
/// option of their predecessor. Duplicates collapse; document order is kept.
///
/// # Errors
///
/// Returns `HarvestError::InvalidCategoryId` for the first leaf whose value
/// is not an integer.
pub fn leaf_categories(options: &[CategoryOption]) -> Result<Vec<Category>, HarvestError> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for (index, option) in options.iter().enumerate() {
        if option.value.is_empty() || !is_leaf(option, options.get(index + 1)) {
            continue;
        }

        let id = option
            .value
            .trim()
            .parse::<u32>()
            .map_err(|source| HarvestError::InvalidCategoryId {
                value: option.value.clone(),
                source,
            })?;

        let category = Category::new(id, option.label.trim());
        if seen.insert(category.clone()) {
            categories.push(category);
        }
    }

    Ok(categories)
}

// ===== Listing pages =====

/// Reasons a listing row is skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has no product anchor")]
    MissingAnchor,

    #[error("product anchor has no href")]
    MissingHref,

    #[error("href '{0}' carries no products_id")]
    MissingProductId(String),

    #[error("product anchor has no name text")]
    MissingName,

    #[error("row has no price")]
    MissingPrice,

    #[error("bad product link: {0}")]
    Query(#[from] QueryError),

    #[error("bad price: {0}")]
    Price(#[from] PriceError),
}

/// A product summary extracted from a listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub product_id: String,
    pub name: String,
    pub price: Price,
}

/// Everything the paginator needs from one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Row outcomes in document order
    pub rows: Vec<Result<ListingRow, RowError>>,

    /// Trimmed text of the upper-bound counter, if present
    pub upper_bound: Option<String>,

    /// Trimmed text of the total-elements counter, if present
    pub total_elements: Option<String>,
}

impl ListingPage {
    /// Returns true if neither result counter is on the page
    pub fn counters_absent(&self) -> bool {
        self.upper_bound.is_none() && self.total_elements.is_none()
    }

    /// Both counters as numbers, `None` if either is missing or not numeric
    pub fn bounds(&self) -> Option<(u32, u32)> {
        let upper = self.upper_bound.as_deref()?.parse().ok()?;
        let total = self.total_elements.as_deref()?.parse().ok()?;
        Some((upper, total))
    }

    /// Returns true if the counters say more products follow
    pub fn has_next_page(&self) -> bool {
        matches!(self.bounds(), Some((upper, total)) if upper < total)
    }
}

/// Parses one listing page
pub fn parse_listing_page(body: &str, locators: &Locators) -> ListingPage {
    let page = Page::parse(body);

    let counter = |locator: &Locator| {
        page.first(locator)
            .map(|node| markup::text(node).trim().to_string())
    };

    let rows = page
        .select(&locators.listing_row)
        .into_iter()
        .map(|row| parse_row(row, locators))
        .collect();

    ListingPage {
        rows,
        upper_bound: counter(&locators.upper_bound),
        total_elements: counter(&locators.total_elements),
    }
}

/// Extracts id, name and price from a listing row
fn parse_row(row: ElementRef<'_>, locators: &Locators) -> Result<ListingRow, RowError> {
    let anchors = markup::select_within(row, &locators.row_anchor);
    let anchor = *anchors.first().ok_or(RowError::MissingAnchor)?;
    if anchors.len() > 1 {
        tracing::debug!("Row has {} product anchors, using the first", anchors.len());
    }
    let href = markup::attr(anchor, "href").ok_or(RowError::MissingHref)?;

    let params = parse_query(query_of(href))?;
    let product_id = params
        .get("products_id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RowError::MissingProductId(href.to_string()))?
        .to_string();

    let name = markup::leading_text(anchor)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(RowError::MissingName)?;

    let price_text = markup::first_within(row, &locators.row_price)
        .and_then(markup::leading_text)
        .ok_or(RowError::MissingPrice)?;
    let price = Price::from_listing_text(&price_text)?;

    Ok(ListingRow {
        product_id,
        name,
        price,
    })
}

// ===== Detail pages =====

/// Optional product fields found on a detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub image_src: Option<String>,
    pub description: Option<String>,
}

/// Parses a product detail page
pub fn parse_product_details(body: &str, locators: &Locators) -> ProductDetails {
    let page = Page::parse(body);

    let image_src = page
        .first(&locators.detail_image)
        .and_then(|anchor| markup::attr(anchor, "href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string);

    let description = page
        .first(&locators.detail_description)
        .and_then(|container| markup::element_child(container, locators.detail_description_child))
        .map(markup::inner_html);

    ProductDetails {
        image_src,
        description,
    }
}
