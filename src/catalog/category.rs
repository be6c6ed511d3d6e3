//! Leaf categories of the storefront

use std::fmt;

/// A leaf category of the storefront catalog
///
/// Categories are immutable once resolved. Products refer to their category
/// through an `Arc<Category>` so every product of a category shares one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    /// Storefront category id (the `cPath` parameter)
    pub id: u32,

    /// Display name without its indentation
    pub name: String,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
