//! Per-page term counting

use crate::crawler::ContentBlock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"\p{P}").expect("valid punctuation pattern"))
}

/// Splits text into lowercase terms
///
/// Unicode punctuation separates terms just like whitespace does.
pub fn tokenize(text: &str) -> Vec<String> {
    punctuation()
        .replace_all(text, " ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Term counts for a single page
#[derive(Debug, Clone, Default)]
pub struct TermCounter {
    url: String,
    counts: HashMap<String, u32>,
}

impl TermCounter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            counts: HashMap::new(),
        }
    }

    /// Builds the counter for a page from its content blocks
    pub fn from_blocks(url: impl Into<String>, blocks: &[ContentBlock]) -> Self {
        let mut counter = Self::new(url);
        counter.process_blocks(blocks);
        counter
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Counts the terms of every text node in `blocks`
    pub fn process_blocks(&mut self, blocks: &[ContentBlock]) {
        for block in blocks {
            for node in block.text_nodes() {
                self.process_text(&node);
            }
        }
    }

    pub fn process_text(&mut self, text: &str) {
        for term in tokenize(text) {
            *self.counts.entry(term).or_insert(0) += 1;
        }
    }

    /// Returns the count for `term`, zero if it never occurred
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Total number of terms counted
    pub fn size(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }
}
