//! FIFO frontier of URLs waiting to be crawled
//!
//! Insertion order is visitation order. Entries are not deduplicated on the
//! way in; the crawl loop checks each popped URL against the index instead.

use std::collections::VecDeque;

/// Queue of discovered but not yet processed URLs
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier whose only entry is `seed`
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed);
        frontier
    }

    /// Appends a URL to the back of the queue
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Appends URLs to the back of the queue, keeping their order
    ///
    /// Returns the number of URLs added.
    pub fn extend<T>(&mut self, urls: T) -> usize
    where
        T: IntoIterator<Item = String>,
    {
        let before = self.queue.len();
        self.queue.extend(urls);
        self.queue.len() - before
    }

    /// Removes and returns the URL at the front of the queue
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Returns the number of URLs in the frontier
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates queued URLs from front to back
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }
}
