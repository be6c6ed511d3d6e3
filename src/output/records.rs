//! Delimited product records
//!
//! One title row, then one quoted `;`-separated line per product. Fields are
//! scrubbed of entity leftovers and delimiters before quoting.

use crate::catalog::Product;
use crate::config::OutputConfig;
use crate::crawler::HarvestOutcome;
use crate::output::traits::{OutputHandler, OutputResult};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column titles of the record file
pub const TITLE_ROW: [&str; 7] = [
    "ID",
    "Active(0/1)",
    "Name",
    "Categories (xyz)",
    "Price",
    "Description",
    "ImgSrc",
];

/// Cleans a field value for the record file
///
/// Drops leftover entities and non-breaking spaces, turns arrows into `-`
/// and removes the `;` delimiter.
pub fn sanitize_field(raw: &str) -> String {
    raw.replace("&nbsp;", "")
        .replace("&nbsp", "")
        .replace("&gt;", "")
        .replace("&amp;", "")
        .replace('\u{a0}', "")
        .replace("=>", "-")
        .replace("->", "-")
        .replace(';', "")
}

/// The seven fields of a product line, in title-row order
pub fn product_record(product: &Product) -> [String; 7] {
    [
        product.id.clone(),
        "1".to_string(),
        product.name.clone(),
        product.category.id.to_string(),
        product.price.to_string(),
        product.description.clone(),
        product.image_src.clone(),
    ]
    .map(|field| sanitize_field(&field))
}

/// Writes the title row and one line per product
pub fn write_records<'a, W: Write>(
    writer: W,
    products: impl IntoIterator<Item = &'a Product>,
) -> OutputResult<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(TITLE_ROW)?;
    for product in products {
        writer.write_record(product_record(product))?;
    }
    writer.flush()?;

    Ok(())
}

/// File name for a run started at `timestamp`
///
/// Format: `<prefix>_<dd_MM_yyyy_HHMMSS>.csv`
pub fn output_file_name(prefix: &str, timestamp: DateTime<Local>) -> String {
    format!("{}_{}.csv", prefix, timestamp.format("%d_%m_%Y_%H%M%S"))
}

/// Writes harvested products into a timestamped CSV file
#[derive(Debug, Clone)]
pub struct CsvOutputHandler {
    directory: PathBuf,
    file_prefix: String,
}

impl CsvOutputHandler {
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.directory, &config.file_prefix)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the file a run started at `timestamp` writes
    pub fn path_for(&self, timestamp: DateTime<Local>) -> PathBuf {
        self.directory
            .join(output_file_name(&self.file_prefix, timestamp))
    }
}

impl OutputHandler for CsvOutputHandler {
    fn write_outcome(&mut self, outcome: &HarvestOutcome) -> OutputResult<PathBuf> {
        fs::create_dir_all(&self.directory)?;

        let path = self.path_for(Local::now());
        let file = File::create(&path)?;
        write_records(file, outcome.products())?;

        tracing::info!(
            "Wrote {} products to {}",
            outcome.product_count(),
            path.display()
        );
        Ok(path)
    }
}
