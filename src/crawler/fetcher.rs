//! Page fetchers
//!
//! This module turns a URL into the content blocks of its page. Two
//! strategies share one trait:
//! - `LiveFetcher` performs an HTTP GET with a configured user agent
//! - `LocalFetcher` reads a saved copy of the page from a fixture tree
//!
//! Failures are reported, never retried.

use crate::config::UserAgentConfig;
use crate::crawler::content::{parse_paragraphs, ContentBlock};
use crate::FetchError;
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Source of page content for the crawl loop
pub trait Fetcher {
    /// Fetches `url` and returns its content paragraphs in document order
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<ContentBlock>, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wiki_ripple::config::UserAgentConfig;
/// use wiki_ripple::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "WikiRipple".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over the network
#[derive(Debug, Clone)]
pub struct LiveFetcher {
    client: Client,
}

impl LiveFetcher {
    /// Creates a fetcher with a client built from the user agent config
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for LiveFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<ContentBlock>, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        parse_paragraphs(&body).ok_or_else(|| FetchError::MissingContent {
            url: url.to_string(),
        })
    }
}

/// Reads pages from a directory of saved copies
///
/// `https://en.wikipedia.org/wiki/Java` is read from
/// `<root>/en.wikipedia.org/wiki/Java`.
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    root: PathBuf,
}

impl LocalFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a URL to its fixture file
    pub fn fixture_path(&self, url: &str) -> Result<PathBuf, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let host = parsed.host_str().unwrap_or_default();
        let mut path = self.root.join(host);
        for segment in parsed.path().split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }

        Ok(path)
    }
}

impl Fetcher for LocalFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<ContentBlock>, FetchError> {
        let path = self.fixture_path(url)?;
        tracing::debug!("Reading {} from {}", url, path.display());

        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Fixture {
                url: url.to_string(),
                path: path.clone(),
                source,
            })?;

        parse_paragraphs(&body).ok_or_else(|| FetchError::MissingContent {
            url: url.to_string(),
        })
    }
}
