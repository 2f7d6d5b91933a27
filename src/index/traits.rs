//! Index traits and error types
//!
//! This module defines the trait interface for index backends and
//! associated error types.

use crate::crawler::ContentBlock;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Trait for search index implementations
///
/// The index is the authority on which URLs have been fully processed.
pub trait Index {
    /// Returns true if `url` has already been indexed
    fn is_indexed(&self, url: &str) -> IndexResult<bool>;

    /// Records `url` as indexed together with the term counts of `blocks`
    ///
    /// Any counts previously stored for `url` are replaced.
    fn index_page(&mut self, url: &str, blocks: &[ContentBlock]) -> IndexResult<()>;

    /// Returns the count of `term` for every URL it occurs in
    fn get_term_counts(&self, term: &str) -> IndexResult<HashMap<String, u32>>;

    /// Returns the URLs containing `term`, sorted
    fn get_urls(&self, term: &str) -> IndexResult<Vec<String>>;

    /// Returns the count of `term` on `url`, zero if absent
    fn get_count(&self, url: &str, term: &str) -> IndexResult<u32>;
}
