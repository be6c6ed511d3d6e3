//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CategoryStatus`: How the crawl of one category ended (complete, empty, truncated, failed)

mod category_state;

pub use category_state::CategoryStatus;
