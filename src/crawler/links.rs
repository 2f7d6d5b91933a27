//! Internal link extraction
//!
//! This module decides which anchors of a page are admitted to the frontier:
//! - Only hrefs starting with the site-relative prefix (`/wiki/`) are kept
//! - Kept hrefs are rewritten to absolute URLs under the fixed origin
//! - Everything else (absolute URLs, fragments, other namespaces) is dropped
//!
//! Order is preserved: blocks in document order, anchors in document order
//! within each block. No deduplication happens here.

use crate::crawler::content::ContentBlock;

/// Origin that admitted links are rewritten under
pub const WIKI_ORIGIN: &str = "https://en.wikipedia.org";

/// Literal href prefix of an internal link
pub const WIKI_LINK_PREFIX: &str = "/wiki/";

/// Rule for turning hrefs into candidate frontier URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
    origin: String,
    prefix: String,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::new(WIKI_ORIGIN, WIKI_LINK_PREFIX)
    }
}

impl LinkPolicy {
    /// Creates a policy for the given origin and href prefix
    ///
    /// A trailing `/` on the origin is dropped since admitted hrefs are rooted.
    pub fn new(origin: impl Into<String>, prefix: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the absolute URL for an internal href, or `None` if it is not one
    pub fn admit(&self, href: &str) -> Option<String> {
        if href.starts_with(&self.prefix) {
            Some(format!("{}{}", self.origin, href))
        } else {
            None
        }
    }

    /// Extracts the internal links of a page's blocks, in document order
    pub fn extract(&self, blocks: &[ContentBlock]) -> Vec<String> {
        blocks
            .iter()
            .flat_map(|block| block.hrefs())
            .filter_map(|href| self.admit(&href))
            .collect()
    }
}

/// Extracts internal links using the default wiki policy
///
/// # Example
///
/// ```
/// use wiki_ripple::crawler::{extract_internal_links, ContentBlock};
///
/// let blocks = vec![ContentBlock::new(r#"<p><a href="/wiki/Rust">Rust</a></p>"#)];
/// assert_eq!(
///     extract_internal_links(&blocks),
///     vec!["https://en.wikipedia.org/wiki/Rust".to_string()]
/// );
/// ```
pub fn extract_internal_links(blocks: &[ContentBlock]) -> Vec<String> {
    LinkPolicy::default().extract(blocks)
}
