//! Statistics and term reports from the index
//!
//! This module provides functionality for extracting and displaying
//! index statistics and term lookups.

use crate::index::SqliteIndex;
use crate::CrawlError;
use std::collections::HashMap;

/// Index statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of indexed pages
    pub total_pages: u64,

    /// Number of distinct terms across all pages
    pub distinct_terms: u64,

    /// Number of term occurrences across all pages
    pub term_occurrences: u64,
}

/// Loads statistics from the index
///
/// # Arguments
///
/// * `index` - The index to query
///
/// # Returns
///
/// * `Ok(IndexStatistics)` - Successfully loaded statistics
/// * `Err(CrawlError)` - Failed to query statistics
pub fn load_statistics(index: &SqliteIndex) -> Result<IndexStatistics, CrawlError> {
    Ok(IndexStatistics {
        total_pages: index.count_pages()?,
        distinct_terms: index.count_terms()?,
        term_occurrences: index.count_term_occurrences()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Pages indexed: {}", stats.total_pages);
    println!("  Distinct terms: {}", stats.distinct_terms);
    println!("  Term occurrences: {}", stats.term_occurrences);

    let average = if stats.total_pages > 0 {
        stats.term_occurrences as f64 / stats.total_pages as f64
    } else {
        0.0
    };
    println!("  Average terms per page: {:.1}", average);
}

/// Orders a term's counts by count (descending), then URL
pub fn sorted_counts(counts: &HashMap<String, u32>) -> Vec<(&str, u32)> {
    let mut rows: Vec<_> = counts
        .iter()
        .map(|(url, count)| (url.as_str(), *count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

/// Prints the URL → count table for a term
pub fn print_term_counts(term: &str, counts: &HashMap<String, u32>) {
    println!("Term '{}' ({} pages):", term, counts.len());
    for (url, count) in sorted_counts(counts) {
        println!("  {}={}", url, count);
    }
}
