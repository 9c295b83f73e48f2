//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::graph::{GraphPage, LinkGraph};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{
    AnalysisListing, AnalysisSnapshot, AnalysisSource, CrawlRecord, StoredAnalysis,
};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database file and applies the schema
    pub fn new(path: &Path) -> StorageResult<Self> {
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

        tracing::debug!("Opened database at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Runs arbitrary SQL against the connection
    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> StorageResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    // ===== Crawls =====

    fn save_crawl(&mut self, start_url: &str, graph: &LinkGraph) -> StorageResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO crawls (id, start_url, created_at, page_count) VALUES (?1, ?2, ?3, ?4)",
            params![id, start_url, now, graph.len() as i64],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO crawl_pages (crawl_id, position, url, outbound_links)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, page) in graph.pages().enumerate() {
                let links = serde_json::to_string(&page.links)?;
                stmt.execute(params![id, position as i64, page.url, links])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Saved crawl {} with {} pages", id, graph.len());
        Ok(id)
    }

    fn load_crawl(&self, crawl_id: &str) -> StorageResult<Option<CrawlRecord>> {
        let header = self
            .conn
            .query_row(
                "SELECT id, start_url, created_at FROM crawls WHERE id = ?1",
                params![crawl_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
            )
            .optional()?;

        let Some((id, start_url, created_at)) = header else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT url, outbound_links FROM crawl_pages WHERE crawl_id = ?1 ORDER BY position",
        )?;
        let rows = stmt
            .query_map(params![crawl_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut pages = Vec::with_capacity(rows.len());
        for (url, links) in rows {
            let links: Vec<String> = serde_json::from_str(&links)?;
            pages.push(GraphPage { url, links });
        }

        Ok(Some(CrawlRecord {
            id,
            start_url,
            created_at,
            graph: LinkGraph::from(pages),
        }))
    }

    // ===== Analyses =====

    fn save_analysis(&mut self, snapshot: &AnalysisSnapshot<'_>) -> StorageResult<String> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let summary = &snapshot.report.summary;

        self.conn.execute(
            "INSERT INTO analyses (id, created_at, source_kind, source_value, root_url,
             config_hash, total_pages, total_links, report, page_details, link_graph)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                now,
                snapshot.source.kind(),
                snapshot.source.value(),
                snapshot.root_url,
                snapshot.config_hash,
                summary.total_pages as i64,
                summary.total_links as i64,
                serde_json::to_string(snapshot.report)?,
                serde_json::to_string(snapshot.pages)?,
                serde_json::to_string(snapshot.graph)?,
            ],
        )?;

        tracing::debug!("Saved analysis {}", id);
        Ok(id)
    }

    fn get_analysis(&self, analysis_id: &str) -> StorageResult<Option<StoredAnalysis>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, created_at, source_kind, source_value, root_url, config_hash,
                 report, page_details, link_graph
                 FROM analyses WHERE id = ?1",
                params![analysis_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, created_at, kind, value, root_url, config_hash, report, pages, graph)) = row
        else {
            return Ok(None);
        };

        Ok(Some(StoredAnalysis {
            source: parse_source(&kind, value)?,
            id,
            created_at,
            root_url,
            config_hash,
            report: serde_json::from_str(&report)?,
            pages: serde_json::from_str(&pages)?,
            graph: serde_json::from_str(&graph)?,
        }))
    }

    fn list_analyses(&self, limit: usize) -> StorageResult<Vec<AnalysisListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, source_kind, source_value, root_url, total_pages, total_links
             FROM analyses ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit as i64], listing_columns)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut listing = Vec::with_capacity(rows.len());
        for (id, created_at, kind, value, root_url, total_pages, total_links) in rows {
            listing.push(AnalysisListing {
                source: parse_source(&kind, value)?,
                id,
                created_at,
                root_url,
                total_pages: total_pages as u64,
                total_links: total_links as u64,
            });
        }

        Ok(listing)
    }

    // ===== Statistics =====

    fn count_crawls(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM crawls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_analyses(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

type ListingRow = (String, String, String, String, String, i64, i64);

fn listing_columns(row: &Row<'_>) -> rusqlite::Result<ListingRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn parse_source(kind: &str, value: String) -> StorageResult<AnalysisSource> {
    AnalysisSource::from_db(kind, value)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown analysis source kind '{}'", kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_graph, AnalysisParams};

    fn sample_graph() -> LinkGraph {
        let mut graph = LinkGraph::new();
        graph.insert(
            "https://example.com/z",
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/a".to_string(),
            ],
        );
        graph.insert("https://example.com/a", vec!["https://example.com/z".to_string()]);
        graph.insert("https://example.com/m", vec![]);
        graph
    }

    fn save_sample_analysis(storage: &mut SqliteStorage) -> String {
        let graph = sample_graph();
        let analysis = analyze_graph(&graph, None, AnalysisParams::default()).unwrap();
        let source = AnalysisSource::StartUrl("https://example.com/z".to_string());
        storage
            .save_analysis(&AnalysisSnapshot {
                source: &source,
                root_url: &analysis.root,
                config_hash: "test_hash",
                report: &analysis.report,
                pages: &analysis.pages,
                graph: &graph,
            })
            .unwrap()
    }

    #[test]
    fn test_create_in_memory() {
        let storage = SqliteStorage::new_in_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_crawl_roundtrip_keeps_order_and_duplicates() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let graph = sample_graph();

        let id = storage.save_crawl("https://example.com/z", &graph).unwrap();
        let loaded = storage.load_crawl(&id).unwrap().unwrap();

        assert_eq!(loaded.id, id);
        assert_eq!(loaded.start_url, "https://example.com/z");
        assert_eq!(loaded.graph, graph);
        assert_eq!(loaded.graph.first_url(), Some("https://example.com/z"));
        assert_eq!(loaded.graph.edge_count(), 3);
    }

    #[test]
    fn test_missing_crawl_is_none() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(storage.load_crawl("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_empty_crawl_roundtrip() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = storage.save_crawl("https://example.com/", &LinkGraph::new()).unwrap();

        let loaded = storage.load_crawl(&id).unwrap().unwrap();
        assert!(loaded.graph.is_empty());
    }

    #[test]
    fn test_analysis_roundtrip() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let id = save_sample_analysis(&mut storage);

        let stored = storage.get_analysis(&id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.root_url, "https://example.com/z");
        assert_eq!(stored.config_hash, "test_hash");
        assert_eq!(stored.report.summary.total_pages, 3);
        assert_eq!(stored.pages.len(), 3);
        assert_eq!(stored.graph, sample_graph());
        assert_eq!(
            stored.source,
            AnalysisSource::StartUrl("https://example.com/z".to_string())
        );
    }

    #[test]
    fn test_list_analyses_limit_and_counts() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let first = save_sample_analysis(&mut storage);
        let second = save_sample_analysis(&mut storage);
        storage.save_crawl("https://example.com/", &sample_graph()).unwrap();

        let listing = storage.list_analyses(10).unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().any(|l| l.id == first));
        assert!(listing.iter().any(|l| l.id == second));
        assert_eq!(listing[0].total_pages, 3);
        assert_eq!(listing[0].total_links, 3);

        assert_eq!(storage.list_analyses(1).unwrap().len(), 1);
        assert_eq!(storage.count_analyses().unwrap(), 2);
        assert_eq!(storage.count_crawls().unwrap(), 1);
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkrank.db");

        let id = {
            let mut storage = SqliteStorage::new(&path).unwrap();
            storage.save_crawl("https://example.com/z", &sample_graph()).unwrap()
        };

        let storage = SqliteStorage::new(&path).unwrap();
        assert!(storage.load_crawl(&id).unwrap().is_some());
    }
}
