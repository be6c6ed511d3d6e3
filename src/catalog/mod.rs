//! Catalog data model
//!
//! Categories and products as they are harvested from the storefront,
//! plus the per-category product set with its deduplication strategy.

mod category;
mod price;
mod product;
mod set;

pub use category::Category;
pub use price::{Price, PriceError};
pub use product::Product;
pub use set::{DedupStrategy, ProductSet};
