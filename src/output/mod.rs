//! Output module for index reports
//!
//! This module handles:
//! - Loading and printing index statistics
//! - Printing term → {url, count} tables

pub mod stats;

pub use stats::{load_statistics, print_statistics, print_term_counts, IndexStatistics};
