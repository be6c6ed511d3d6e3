use crate::catalog::{Category, Price};
use std::fmt;
use std::sync::Arc;

/// A product harvested from a listing row and its detail page
///
/// Equality and hashing are structural over every field, including the
/// optional detail fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    /// Storefront product id (the `products_id` parameter)
    pub id: String,

    /// Name as shown on the listing row
    pub name: String,

    /// The leaf category the product was listed under
    pub category: Arc<Category>,

    /// Listing price
    pub price: Price,

    /// Link to the full-size product image, empty when the detail page has none
    pub image_src: String,

    /// Description markup from the detail page, empty when absent
    pub description: String,
}

impl Product {
    /// Creates a product stub with empty detail fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Arc<Category>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            price,
            image_src: String::new(),
            description: String::new(),
        }
    }

    /// Returns true once the detail page contributed at least one field
    pub fn is_enriched(&self) -> bool {
        !self.image_src.is_empty() || !self.description.is_empty()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} @ {} in {}",
            self.id, self.name, self.price, self.category.name
        )
    }
}
