//! Harvest statistics
//!
//! This module summarizes a finished harvest per category status and prints
//! the summary to stdout.

use crate::crawler::HarvestOutcome;
use std::collections::BTreeMap;
use std::time::Duration;

/// Harvest statistics summary
#[derive(Debug, Clone)]
pub struct HarvestStatistics {
    /// Number of leaf categories crawled
    pub total_categories: usize,

    /// Number of products over all categories
    pub total_products: usize,

    /// Products whose detail page contributed at least one field
    pub enriched_products: usize,

    /// Listing pages fetched over all categories
    pub pages_fetched: u64,

    /// Count of categories by status label
    pub categories_by_status: BTreeMap<&'static str, usize>,

    /// Categories that failed, with the reason
    pub failed_categories: Vec<(String, String)>,

    /// Categories cut off by the page ceiling
    pub truncated_categories: Vec<String>,

    /// Wall time of the run
    pub elapsed: Duration,
}

impl HarvestStatistics {
    /// Computes the statistics of an outcome
    pub fn from_outcome(outcome: &HarvestOutcome) -> Self {
        let mut categories_by_status = BTreeMap::new();
        let mut failed_categories = Vec::new();
        let mut truncated_categories = Vec::new();
        let mut enriched_products = 0;
        let mut pages_fetched = 0;

        for report in &outcome.reports {
            *categories_by_status.entry(report.status.label()).or_insert(0) += 1;
            pages_fetched += u64::from(report.pages_fetched);
            enriched_products += report.products.iter().filter(|p| p.is_enriched()).count();

            if report.status.is_error() {
                failed_categories.push((report.category.to_string(), report.status.to_string()));
            }
            if report.status.is_truncated() {
                truncated_categories.push(report.category.to_string());
            }
        }

        Self {
            total_categories: outcome.reports.len(),
            total_products: outcome.product_count(),
            enriched_products,
            pages_fetched,
            categories_by_status,
            failed_categories,
            truncated_categories,
            elapsed: outcome.elapsed,
        }
    }

    /// Share of products enriched from their detail page, as a percentage
    pub fn enrichment_rate(&self) -> f64 {
        if self.total_products == 0 {
            return 0.0;
        }
        (self.enriched_products as f64 / self.total_products as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Leaf categories: {}", stats.total_categories);
    println!("  Products: {}", stats.total_products);
    println!("  Listing pages fetched: {}", stats.pages_fetched);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    println!("Categories by Status:");
    for (label, count) in &stats.categories_by_status {
        println!("  {}: {}", label, count);
    }
    println!();

    if !stats.failed_categories.is_empty() {
        println!("Failed Categories ({}):", stats.failed_categories.len());
        for (category, reason) in &stats.failed_categories {
            println!("  - {}: {}", category, reason);
        }
        println!();
    }

    if !stats.truncated_categories.is_empty() {
        println!(
            "Page Limit Reached ({}):",
            stats.truncated_categories.len()
        );
        for category in &stats.truncated_categories {
            println!("  - {}", category);
        }
        println!();
    }

    println!(
        "Enrichment Rate: {:.1}% ({} / {} products with detail fields)",
        stats.enrichment_rate(),
        stats.enriched_products,
        stats.total_products
    );
}
