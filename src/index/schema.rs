//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Wiki-Ripple index.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per indexed page
CREATE TABLE IF NOT EXISTS pages (
    url TEXT PRIMARY KEY,
    indexed_at TEXT NOT NULL,
    term_total INTEGER NOT NULL
);

-- Inverted index: term -> {url, count}
CREATE TABLE IF NOT EXISTS term_counts (
    term TEXT NOT NULL,
    url TEXT NOT NULL REFERENCES pages(url) ON DELETE CASCADE,
    count INTEGER NOT NULL,
    PRIMARY KEY (term, url)
);

CREATE INDEX IF NOT EXISTS idx_term_counts_url ON term_counts(url);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The SQLite connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(tables, vec!["pages", "term_counts"]);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();
    }
}
