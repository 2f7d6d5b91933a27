//! Crawler module for page fetching and frontier processing
//!
//! This module contains the core crawling logic, including:
//! - Fetching pages live or from a fixture tree
//! - Splitting pages into paragraph-level content blocks
//! - Extracting internal links from those blocks
//! - The FIFO frontier and the step-wise crawl loop

mod content;
mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use content::{parse_paragraphs, ContentBlock};
pub use coordinator::{CrawlReport, WikiCrawler};
pub use fetcher::{build_http_client, Fetcher, LiveFetcher, LocalFetcher};
pub use frontier::Frontier;
pub use links::{extract_internal_links, LinkPolicy, WIKI_LINK_PREFIX, WIKI_ORIGIN};
