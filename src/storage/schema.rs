//! Database schema definitions and migrations
//!
//! This module contains all SQL schema definitions for the Sumi-Linkrank database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Stored link graphs, either crawled or imported
CREATE TABLE IF NOT EXISTS crawls (
    id TEXT PRIMARY KEY,
    start_url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    page_count INTEGER NOT NULL
);

-- One row per graph key; position keeps the key order
CREATE TABLE IF NOT EXISTS crawl_pages (
    crawl_id TEXT NOT NULL REFERENCES crawls(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    url TEXT NOT NULL,
    outbound_links TEXT NOT NULL,
    PRIMARY KEY (crawl_id, position)
);

-- Analysis snapshots
CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    source_kind TEXT NOT NULL,
    source_value TEXT NOT NULL,
    root_url TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    total_pages INTEGER NOT NULL,
    total_links INTEGER NOT NULL,
    report TEXT NOT NULL,
    page_details TEXT NOT NULL,
    link_graph TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_created ON analyses(created_at);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
