//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! errors they report.

use crate::crawler::HarvestOutcome;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// An output handler persists the products of a finished harvest somewhere
/// a person or another tool can pick them up.
pub trait OutputHandler {
    /// Writes every product of the outcome
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the records were written
    /// * `Err(OutputError)` - Nothing usable was written
    fn write_outcome(&mut self, outcome: &HarvestOutcome) -> OutputResult<PathBuf>;
}
