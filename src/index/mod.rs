//! Index module for term lookup over crawled pages
//!
//! This module handles everything the crawl loop hands pages to, including:
//! - Counting terms in a page's content blocks
//! - SQLite schema and persistence of per-page term counts
//! - Answering "is this URL already indexed" for the crawl loop
//! - Term → {url, count} lookups for downstream consumers

mod schema;
mod sqlite;
mod terms;
mod traits;

pub use sqlite::SqliteIndex;
pub use terms::{tokenize, TermCounter};
pub use traits::{Index, IndexError, IndexResult};
