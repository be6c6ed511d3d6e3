//! Per-category product sets
//!
//! A product can be seen more than once during a crawl (a listing that
//! shifts between pages, a storefront that repeats rows). How repeated
//! sightings collapse is decided by [`DedupStrategy`].

use crate::catalog::Product;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// How repeated sightings of a product are collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupStrategy {
    /// Full structural equality: sightings that differ in any field all survive
    #[default]
    ByValue,

    /// One entry per product id: the latest sighting replaces earlier ones
    ById,
}

/// The set of products collected for one category
#[derive(Debug, Clone)]
pub enum ProductSet {
    ByValue(HashSet<Product>),
    ById(HashMap<String, Product>),
}

impl ProductSet {
    /// Creates an empty set using the given strategy
    pub fn new(strategy: DedupStrategy) -> Self {
        match strategy {
            DedupStrategy::ByValue => Self::ByValue(HashSet::new()),
            DedupStrategy::ById => Self::ById(HashMap::new()),
        }
    }

    /// The strategy this set deduplicates with
    pub fn strategy(&self) -> DedupStrategy {
        match self {
            Self::ByValue(_) => DedupStrategy::ByValue,
            Self::ById(_) => DedupStrategy::ById,
        }
    }

    /// Inserts a product
    ///
    /// Returns true if the set grew. Under [`DedupStrategy::ById`] an existing
    /// entry with the same id is replaced and false is returned.
    pub fn insert(&mut self, product: Product) -> bool {
        match self {
            Self::ByValue(set) => set.insert(product),
            Self::ById(map) => map.insert(product.id.clone(), product).is_none(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ByValue(set) => set.len(),
            Self::ById(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the products in no particular order
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Product> + '_> {
        match self {
            Self::ByValue(set) => Box::new(set.iter()),
            Self::ById(map) => Box::new(map.values()),
        }
    }

    /// Returns the products sorted by id, ties broken by name
    pub fn to_sorted_vec(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.iter().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        products
    }
}

impl Default for ProductSet {
    fn default() -> Self {
        Self::new(DedupStrategy::default())
    }
}

impl Extend<Product> for ProductSet {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        for product in iter {
            self.insert(product);
        }
    }
}
