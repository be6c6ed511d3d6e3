//! Output module for harvested records and run summaries
//!
//! This module handles:
//! - Writing products as delimited records
//! - Computing and printing harvest statistics

mod records;
pub mod stats;
mod traits;

pub use records::{
    output_file_name, product_record, sanitize_field, write_records, CsvOutputHandler, TITLE_ROW,
};
pub use stats::{print_statistics, HarvestStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
