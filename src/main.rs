//! Shelf-Crawler main entry point
//!
//! This is the command-line interface for the Shelf-Crawler storefront harvester.

use anyhow::Context;
use clap::Parser;
use shelf_crawler::config::{load_config_with_hash, Config};
use shelf_crawler::crawler::Harvester;
use shelf_crawler::output::{print_statistics, CsvOutputHandler, HarvestStatistics, OutputHandler};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Crawler: a storefront catalog harvester
///
/// Shelf-Crawler reads the category tree of an osCommerce-style shop, walks
/// every leaf category's listing, enriches each product from its detail page
/// and writes the records to a timestamped CSV file.
#[derive(Parser, Debug)]
#[command(name = "shelf-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A storefront catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and list the leaf categories without crawling them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config).await
    } else {
        handle_harvest(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_crawler=info,warn"),
            1 => EnvFilter::new("shelf_crawler=debug,info"),
            2 => EnvFilter::new("shelf_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and lists the leaf categories
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Shelf-Crawler Dry Run ===\n");

    println!("Storefront:");
    println!("  Base URL: {}", config.storefront.base_url);
    println!("  Search page: {}", config.storefront.search_path);
    println!("  Listing page: {}", config.storefront.listing_path);
    println!("  Detail page: {}", config.storefront.detail_path);

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent categories: {}",
        config.crawler.max_concurrent_categories
    );
    println!(
        "  Max pages per category: {}",
        config.crawler.max_pages_per_category
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Dedup: {:?}", config.crawler.dedup);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  File prefix: {}", config.output.file_prefix);

    let harvester = Harvester::new(config).context("Failed to set up the harvester")?;
    let categories = harvester
        .resolve_categories()
        .await
        .context("Failed to resolve categories")?;

    println!("\nLeaf Categories ({}):", categories.len());
    for category in &categories {
        println!("  - {}", category);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} categories", categories.len());

    Ok(())
}

/// Handles the main harvest: crawl, write records, print statistics
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting harvest of {}", config.storefront.base_url);

    let harvester = Harvester::new(config).context("Failed to set up the harvester")?;
    let outcome = harvester.run().await.context("Harvest failed")?;

    let mut handler = CsvOutputHandler::from_config(&config.output);
    let path = handler
        .write_outcome(&outcome)
        .with_context(|| format!("Failed to write records to {}", config.output.directory))?;

    print_statistics(&HarvestStatistics::from_outcome(&outcome));
    println!("\n✓ Records written to: {}", path.display());

    Ok(())
}
