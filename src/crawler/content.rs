//! Paragraph-level content blocks
//!
//! A fetched page is reduced to the `<p>` elements of its main content
//! container. Each block keeps its own markup so that both the index (text)
//! and the link extractor (anchors) can read it.

use scraper::{Html, Selector};

/// Selector for the paragraphs of a wiki article body
const PARAGRAPH_SELECTOR: &str = "#mw-content-text p";

/// One paragraph of page content, held as its outer HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    html: String,
}

impl ContentBlock {
    /// Wraps a paragraph's markup
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Returns the raw markup of the block
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the `href` value of every anchor in the block, in document order
    pub fn hrefs(&self) -> Vec<String> {
        let fragment = Html::parse_fragment(&self.html);
        let mut hrefs = Vec::new();

        if let Ok(a_selector) = Selector::parse("a[href]") {
            for element in fragment.select(&a_selector) {
                if let Some(href) = element.value().attr("href") {
                    hrefs.push(href.to_string());
                }
            }
        }

        hrefs
    }

    /// Returns each text node of the block, in document order
    pub fn text_nodes(&self) -> Vec<String> {
        let fragment = Html::parse_fragment(&self.html);
        fragment
            .root_element()
            .text()
            .map(str::to_string)
            .collect()
    }

    /// Returns the text content of the block
    pub fn text(&self) -> String {
        self.text_nodes().concat()
    }
}

/// Splits a full page into its content paragraphs
///
/// Returns `None` if the page has no `#mw-content-text` container.
pub fn parse_paragraphs(html: &str) -> Option<Vec<ContentBlock>> {
    let document = Html::parse_document(html);

    let content_selector = Selector::parse("#mw-content-text").ok()?;
    document.select(&content_selector).next()?;

    let paragraph_selector = Selector::parse(PARAGRAPH_SELECTOR).ok()?;
    let blocks = document
        .select(&paragraph_selector)
        .map(|element| ContentBlock::new(element.html()))
        .collect();

    Some(blocks)
}
