//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::graph::LinkGraph;
use crate::storage::{AnalysisListing, AnalysisSnapshot, CrawlRecord, StoredAnalysis};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Stores link graphs for later analysis and snapshots of finished analyses.
pub trait Storage {
    // ===== Crawls =====

    /// Stores a link graph and returns its generated crawl ID
    ///
    /// Page order is preserved so that a reloaded graph has the same root.
    fn save_crawl(&mut self, start_url: &str, graph: &LinkGraph) -> StorageResult<String>;

    /// Loads a stored link graph
    ///
    /// Returns `Ok(None)` when no crawl has that ID.
    fn load_crawl(&self, crawl_id: &str) -> StorageResult<Option<CrawlRecord>>;

    // ===== Analyses =====

    /// Stores an analysis snapshot and returns its generated analysis ID
    fn save_analysis(&mut self, snapshot: &AnalysisSnapshot<'_>) -> StorageResult<String>;

    /// Loads a stored analysis by ID
    fn get_analysis(&self, analysis_id: &str) -> StorageResult<Option<StoredAnalysis>>;

    /// Lists the most recent analyses, newest first
    fn list_analyses(&self, limit: usize) -> StorageResult<Vec<AnalysisListing>>;

    // ===== Statistics =====

    fn count_crawls(&self) -> StorageResult<u64>;

    fn count_analyses(&self) -> StorageResult<u64>;
}
