//! Storage module for persisting link graphs and analyses
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Stored crawls (ordered link graphs) that can be analyzed by ID
//! - Analysis snapshots with their report, page records and graph

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::analysis::AnalysisReport;
use crate::graph::{LinkGraph, PageRecord};
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Where an analyzed graph came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisSource {
    /// A stored crawl, by ID
    Crawl(String),
    /// A fresh crawl from a start URL
    StartUrl(String),
}

impl AnalysisSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Crawl(_) => "crawl",
            Self::StartUrl(_) => "start-url",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Crawl(value) | Self::StartUrl(value) => value,
        }
    }

    pub fn from_db(kind: &str, value: String) -> Option<Self> {
        match kind {
            "crawl" => Some(Self::Crawl(value)),
            "start-url" => Some(Self::StartUrl(value)),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.value())
    }
}

/// A stored link graph
#[derive(Debug, Clone)]
pub struct CrawlRecord {
    pub id: String,
    pub start_url: String,
    pub created_at: String,
    pub graph: LinkGraph,
}

/// Everything persisted about one finished analysis
#[derive(Debug, Clone, Copy)]
pub struct AnalysisSnapshot<'a> {
    pub source: &'a AnalysisSource,
    pub root_url: &'a str,
    pub config_hash: &'a str,
    pub report: &'a AnalysisReport,
    pub pages: &'a [PageRecord],
    pub graph: &'a LinkGraph,
}

/// A snapshot loaded back from storage
#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub id: String,
    pub created_at: String,
    pub source: AnalysisSource,
    pub root_url: String,
    pub config_hash: String,
    pub report: AnalysisReport,
    pub pages: Vec<PageRecord>,
    pub graph: LinkGraph,
}

/// One line of the analysis listing
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisListing {
    pub id: String,
    pub created_at: String,
    pub source: AnalysisSource,
    pub root_url: String,
    pub total_pages: u64,
    pub total_links: u64,
}
