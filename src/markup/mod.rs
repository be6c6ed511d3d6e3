//! Markup extraction
//!
//! A thin capability layer over `scraper`: compiled locators, parsed pages and
//! the node accessors the crawler needs. A locator that matches nothing is a
//! normal outcome and is reported as an empty result, never as an error.
//!
//! Parsed pages are not `Send`. Callers parse, extract owned values and drop
//! the page before their next await point.

use crate::HarvestError;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// A compiled CSS locator
#[derive(Clone)]
pub struct Locator {
    source: String,
    selector: Selector,
}

impl Locator {
    /// Compiles a CSS selector
    ///
    /// # Errors
    ///
    /// Returns `HarvestError::Locator` if the selector does not parse.
    pub fn parse(css: &str) -> Result<Self, HarvestError> {
        let selector = Selector::parse(css).map_err(|e| HarvestError::Locator {
            locator: css.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: css.to_string(),
            selector,
        })
    }

    /// The selector text this locator was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locator").field(&self.source).finish()
    }
}

/// A parsed HTML document
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses a full HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// All nodes matching the locator, in document order
    pub fn select<'a>(&'a self, locator: &Locator) -> Vec<ElementRef<'a>> {
        self.html.select(&locator.selector).collect()
    }

    /// The first node matching the locator
    pub fn first<'a>(&'a self, locator: &Locator) -> Option<ElementRef<'a>> {
        self.html.select(&locator.selector).next()
    }
}

/// Descendants of `node` matching the locator, in document order
pub fn select_within<'a>(node: ElementRef<'a>, locator: &Locator) -> Vec<ElementRef<'a>> {
    node.select(&locator.selector).collect()
}

/// The first descendant of `node` matching the locator
pub fn first_within<'a>(node: ElementRef<'a>, locator: &Locator) -> Option<ElementRef<'a>> {
    node.select(&locator.selector).next()
}

/// Text of the node's first child, untrimmed
///
/// A text child is returned as is; an element child contributes its text
/// content. Returns `None` for a node without children.
pub fn leading_text(node: ElementRef<'_>) -> Option<String> {
    let child = node.children().next()?;
    match child.value() {
        Node::Text(content) => {
            let content: &str = content;
            Some(content.to_string())
        }
        Node::Element(_) => ElementRef::wrap(child).map(text),
        _ => None,
    }
}

/// Full text content of the node
pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// Attribute value, `None` when the attribute is absent
pub fn attr<'a>(node: ElementRef<'a>, name: &str) -> Option<&'a str> {
    node.value().attr(name)
}

/// The element child at `index` (0-based, text nodes are skipped)
pub fn element_child(node: ElementRef<'_>, index: usize) -> Option<ElementRef<'_>> {
    node.children().filter_map(ElementRef::wrap).nth(index)
}

/// Inner HTML of the node
pub fn inner_html(node: ElementRef<'_>) -> String {
    node.inner_html()
}

/// Text as an HTML serializer writes it back out
///
/// `&`, `<`, `>` and the non-breaking space are written as their entities,
/// the way the storefront emitted them.
pub fn serialized_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}
