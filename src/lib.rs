//! Wiki-Ripple: a breadth-first wiki crawler and term indexer
//!
//! This crate crawls a wiki outward from a single seed page, following internal
//! `/wiki/` links in the order they appear, and hands every visited page's
//! paragraphs to a search index that answers term lookups.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Wiki-Ripple operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Index unavailable: {0}")]
    IndexUnavailable(#[from] index::IndexError),
}

/// Errors raised while turning a URL into content blocks
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Failed to read fixture {} for {url}: {source}", .path.display())]
    Fixture {
        url: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No content section found in {url}")]
    MissingContent { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wiki-Ripple operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{extract_internal_links, ContentBlock, Fetcher, LinkPolicy, WikiCrawler};
pub use index::{Index, SqliteIndex};
