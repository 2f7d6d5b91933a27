//! SQLite index implementation
//!
//! This module provides a SQLite-based implementation of the Index trait.

use crate::crawler::ContentBlock;
use crate::index::schema::initialize_schema;
use crate::index::terms::TermCounter;
use crate::index::traits::{Index, IndexResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// SQLite index backend
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Creates a new SqliteIndex instance
    ///
    /// Missing parent directories of `path` are created.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened/created database
    /// * `Err(IndexError)` - Failed to open database
    pub fn new(path: &Path) -> IndexResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory index
    pub fn new_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Stores a counted page, replacing any earlier counts for its URL
    pub fn store_counter(&mut self, counter: &TermCounter) -> IndexResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM term_counts WHERE url = ?1",
            params![counter.url()],
        )?;
        tx.execute(
            "INSERT INTO pages (url, indexed_at, term_total) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET
                indexed_at = excluded.indexed_at,
                term_total = excluded.term_total",
            params![counter.url(), now, counter.size()],
        )?;

        {
            let mut stmt =
                tx.prepare("INSERT INTO term_counts (term, url, count) VALUES (?1, ?2, ?3)")?;
            for (term, count) in counter.iter() {
                stmt.execute(params![term, counter.url(), count])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Counts indexed pages
    pub fn count_pages(&self) -> IndexResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Counts distinct terms across all pages
    pub fn count_terms(&self) -> IndexResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT term) FROM term_counts",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Sums the term totals of all pages
    pub fn count_term_occurrences(&self) -> IndexResult<u64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(term_total), 0) FROM pages",
            [],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }

    /// Returns all indexed URLs, sorted
    pub fn indexed_urls(&self) -> IndexResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM pages ORDER BY url")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    /// Removes every page and term count
    pub fn clear(&mut self) -> IndexResult<()> {
        self.conn.execute_batch(
            "
            DELETE FROM term_counts;
            DELETE FROM pages;
        ",
        )?;
        Ok(())
    }
}

impl Index for SqliteIndex {
    fn is_indexed(&self, url: &str) -> IndexResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM pages WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn index_page(&mut self, url: &str, blocks: &[ContentBlock]) -> IndexResult<()> {
        let counter = TermCounter::from_blocks(url, blocks);
        tracing::debug!(
            "Indexing {} ({} terms, {} distinct)",
            url,
            counter.size(),
            counter.len()
        );
        self.store_counter(&counter)
    }

    fn get_term_counts(&self, term: &str) -> IndexResult<HashMap<String, u32>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, count FROM term_counts WHERE term = ?1")?;
        let counts = stmt
            .query_map(params![term], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<HashMap<String, u32>, _>>()?;
        Ok(counts)
    }

    fn get_urls(&self, term: &str) -> IndexResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url FROM term_counts WHERE term = ?1 ORDER BY url")?;
        let urls = stmt
            .query_map(params![term], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    fn get_count(&self, url: &str, term: &str) -> IndexResult<u32> {
        let count: Option<u32> = self
            .conn
            .query_row(
                "SELECT count FROM term_counts WHERE url = ?1 AND term = ?2",
                params![url, term],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const URL: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";

    fn blocks(paragraphs: &[&str]) -> Vec<ContentBlock> {
        paragraphs
            .iter()
            .map(|p| ContentBlock::new(format!("<p>{}</p>", p)))
            .collect()
    }

    #[test]
    fn test_create_in_memory() {
        let index = SqliteIndex::new_in_memory();
        assert!(index.is_ok());
    }

    #[test]
    fn test_fresh_index_is_empty() {
        let index = SqliteIndex::new_in_memory().unwrap();
        assert!(!index.is_indexed(URL).unwrap());
        assert_eq!(index.count_pages().unwrap(), 0);
        assert!(index.get_term_counts("java").unwrap().is_empty());
    }

    #[test]
    fn test_index_page() {
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index
            .index_page(URL, &blocks(&["Java is a language.", "the Java way"]))
            .unwrap();

        assert!(index.is_indexed(URL).unwrap());
        assert_eq!(index.get_count(URL, "java").unwrap(), 2);
        assert_eq!(index.get_count(URL, "missing").unwrap(), 0);
        assert_eq!(index.count_pages().unwrap(), 1);
        assert_eq!(index.count_term_occurrences().unwrap(), 7);
    }

    #[test]
    fn test_page_without_terms_is_indexed() {
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index.index_page(URL, &[]).unwrap();

        assert!(index.is_indexed(URL).unwrap());
        assert_eq!(index.count_terms().unwrap(), 0);
    }

    #[test]
    fn test_get_term_counts_across_pages() {
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index
            .index_page("https://en.wikipedia.org/wiki/A", &blocks(&["the the cat"]))
            .unwrap();
        index
            .index_page("https://en.wikipedia.org/wiki/B", &blocks(&["the dog"]))
            .unwrap();

        let counts = index.get_term_counts("the").unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["https://en.wikipedia.org/wiki/A"], 2);
        assert_eq!(counts["https://en.wikipedia.org/wiki/B"], 1);

        assert_eq!(
            index.get_urls("cat").unwrap(),
            vec!["https://en.wikipedia.org/wiki/A"]
        );
        assert_eq!(index.count_terms().unwrap(), 3);
    }

    #[test]
    fn test_reindex_replaces_counts() {
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index.index_page(URL, &blocks(&["old words here"])).unwrap();
        index.index_page(URL, &blocks(&["new words"])).unwrap();

        assert_eq!(index.count_pages().unwrap(), 1);
        assert_eq!(index.get_count(URL, "old").unwrap(), 0);
        assert_eq!(index.get_count(URL, "new").unwrap(), 1);
        assert_eq!(index.get_count(URL, "words").unwrap(), 1);
    }

    #[test]
    fn test_clear() {
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index.index_page(URL, &blocks(&["words"])).unwrap();
        index.clear().unwrap();

        assert!(!index.is_indexed(URL).unwrap());
        assert!(index.indexed_urls().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("index.db");

        {
            let mut index = SqliteIndex::new(&path).unwrap();
            index.index_page(URL, &blocks(&["persisted"])).unwrap();
        }

        let index = SqliteIndex::new(&path).unwrap();
        assert!(index.is_indexed(URL).unwrap());
        assert_eq!(index.indexed_urls().unwrap(), vec![URL.to_string()]);
    }
}
