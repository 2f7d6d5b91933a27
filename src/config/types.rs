use crate::crawler::{WIKI_LINK_PREFIX, WIKI_ORIGIN};
use serde::Deserialize;

/// Main configuration structure for Wiki-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub index: IndexConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The page the crawl starts from
    pub seed: String,

    /// Origin prepended to admitted site-relative links
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Only hrefs starting with this literal prefix are followed
    #[serde(rename = "link-prefix", default = "default_link_prefix")]
    pub link_prefix: String,

    /// Where page content comes from
    #[serde(default)]
    pub source: FetchSource,

    /// Root of the fixture tree, required for the local source
    #[serde(rename = "fixtures-dir", default)]
    pub fixtures_dir: Option<String>,

    /// Number of newly indexed pages after which a run stops
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// Fetch strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    /// Fetch pages over the network
    #[default]
    Live,

    /// Read pages from a fixture directory
    Local,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Path to the SQLite index file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_origin() -> String {
    WIKI_ORIGIN.to_string()
}

fn default_link_prefix() -> String {
    WIKI_LINK_PREFIX.to_string()
}

fn default_max_pages() -> u32 {
    1
}
