//! Crawl loop - breadth-first frontier processing
//!
//! This module contains the step-wise crawl loop, which:
//! - Owns the seed URL and the FIFO frontier
//! - Checks each popped URL against the index before fetching
//! - Hands fetched pages to the index
//! - Queues the internal links of each page in document order
//!
//! A single `step` performs at most one fetch and one index write. Bounded
//! crawls are loops over `step` built on top.

use crate::crawler::content::ContentBlock;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::links::LinkPolicy;
use crate::index::Index;
use crate::CrawlError;
use std::time::Instant;

/// Summary of a bounded crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// URLs indexed during the run, in crawl order
    pub indexed: Vec<String>,

    /// Steps that ended without producing a page
    pub skipped: usize,

    /// URLs lost to fetch failures
    pub failed: Vec<String>,
}

/// Breadth-first crawler over a wiki
pub struct WikiCrawler<F, I> {
    seed: String,
    frontier: Frontier,
    index: I,
    fetcher: F,
    policy: LinkPolicy,
}

impl<F, I> WikiCrawler<F, I>
where
    F: Fetcher,
    I: Index,
{
    /// Creates a crawler whose frontier holds exactly `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL the crawl starts from
    /// * `index` - The index pages are submitted to
    /// * `fetcher` - The source of page content
    pub fn new(seed: impl Into<String>, index: I, fetcher: F) -> Self {
        let seed = seed.into();
        Self {
            frontier: Frontier::with_seed(seed.clone()),
            seed,
            index,
            fetcher,
            policy: LinkPolicy::default(),
        }
    }

    /// Replaces the link policy used to admit discovered links
    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut I {
        &mut self.index
    }

    pub fn into_index(self) -> I {
        self.index
    }

    /// Returns the number of URLs in the frontier
    pub fn queue_size(&self) -> usize {
        self.frontier.len()
    }

    /// Queues the internal links of `blocks` at the back of the frontier
    ///
    /// Returns the number of URLs queued.
    pub fn queue_internal_links(&mut self, blocks: &[ContentBlock]) -> usize {
        self.frontier.extend(self.policy.extract(blocks))
    }

    /// Processes the URL at the front of the frontier
    ///
    /// # Steps
    ///
    /// 1. Return `None` if the frontier is empty
    /// 2. Pop the front URL; it is never re-queued
    /// 3. Unless `bypass_visited_check` is set, return `None` if the index
    ///    already holds the URL
    /// 4. Fetch the page's content blocks
    /// 5. Submit the URL and blocks to the index
    /// 6. Queue the page's internal links in document order
    ///
    /// # Returns
    ///
    /// * `Ok(Some(url))` - `url` was fetched and indexed
    /// * `Ok(None)` - The frontier was empty or the URL was already indexed
    /// * `Err(CrawlError)` - Fetching or indexing failed; the URL is dropped
    pub async fn step(&mut self, bypass_visited_check: bool) -> Result<Option<String>, CrawlError> {
        let Some(url) = self.frontier.pop() else {
            return Ok(None);
        };

        tracing::info!("Crawling {}", url);

        if !bypass_visited_check && self.index.is_indexed(&url)? {
            tracing::debug!("Already indexed, skipping {}", url);
            return Ok(None);
        }

        let blocks = self.fetcher.fetch(&url).await?;
        self.index.index_page(&url, &blocks)?;

        let queued = self.queue_internal_links(&blocks);
        tracing::debug!(
            "Indexed {} ({} blocks), queued {} links, frontier size {}",
            url,
            blocks.len(),
            queued,
            self.frontier.len()
        );

        Ok(Some(url))
    }

    /// Steps until a page is indexed or the frontier is exhausted
    ///
    /// Errors from `step` are returned as-is.
    pub async fn crawl_until_indexed(
        &mut self,
        bypass_visited_check: bool,
    ) -> Result<Option<String>, CrawlError> {
        while !self.frontier.is_empty() {
            if let Some(url) = self.step(bypass_visited_check).await? {
                return Ok(Some(url));
            }
        }
        Ok(None)
    }

    /// Steps until `max_pages` pages are indexed or the frontier is exhausted
    ///
    /// A fetch failure drops its URL and the run continues. Any other error
    /// aborts the run.
    pub async fn run(
        &mut self,
        max_pages: usize,
        bypass_visited_check: bool,
    ) -> Result<CrawlReport, CrawlError> {
        let mut report = CrawlReport::default();
        let start_time = Instant::now();

        while report.indexed.len() < max_pages {
            let Some(next) = self.frontier.iter().next().map(str::to_string) else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            match self.step(bypass_visited_check).await {
                Ok(Some(url)) => {
                    report.indexed.push(url);

                    if report.indexed.len() % 10 == 0 {
                        tracing::info!(
                            "Progress: {} pages indexed, {} in frontier, {:.2} pages/sec",
                            report.indexed.len(),
                            self.frontier.len(),
                            report.indexed.len() as f64 / start_time.elapsed().as_secs_f64()
                        );
                    }
                }
                Ok(None) => report.skipped += 1,
                Err(CrawlError::Fetch(e)) => {
                    tracing::warn!("Dropping {}: {}", next, e);
                    report.failed.push(next);
                }
                Err(e) => {
                    tracing::error!("Crawl aborted at {}: {}", next, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} indexed, {} skipped, {} failed in {:?}",
            report.indexed.len(),
            report.skipped,
            report.failed.len(),
            start_time.elapsed()
        );

        Ok(report)
    }
}
