//! Request-level analysis service
//!
//! Resolves where the link graph comes from, runs the pipeline, and persists
//! the crawl and the analysis snapshot on a best-effort basis.

use crate::analysis::{analyze_graph, AnalysisParams, LinkAnalysis};
use crate::config::Config;
use crate::crawler::{build_http_client, Crawler};
use crate::graph::LinkGraph;
use crate::storage::{
    open_storage, AnalysisSnapshot, AnalysisSource, SqliteStorage, Storage, StorageError,
    StorageResult,
};
use crate::url::normalize_url;
use crate::{AnalyzerError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Body of an analysis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub crawl_id: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub max_pages: Option<usize>,
}

/// Where the link graph for one analysis comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// Load a stored crawl
    Stored { crawl_id: String },
    /// Crawl the site of `start_url`
    Crawl { start_url: String, max_pages: usize },
}

impl AnalyzeRequest {
    /// Validates the request and picks the graph source
    ///
    /// Exactly one of `crawlId` and `startUrl` must be given; blank strings
    /// count as missing.
    pub fn into_source(self, default_max_pages: usize) -> Result<GraphSource> {
        let crawl_id = non_blank(self.crawl_id);
        let start_url = non_blank(self.start_url);

        match (crawl_id, start_url) {
            (Some(_), Some(_)) => Err(AnalyzerError::validation(
                "Provide either crawlId or startUrl, not both",
            )),
            (None, None) => Err(AnalyzerError::validation(
                "Either crawlId or startUrl is required",
            )),
            (Some(crawl_id), None) => Ok(GraphSource::Stored { crawl_id }),
            (None, Some(start_url)) => {
                let max_pages = self.max_pages.unwrap_or(default_max_pages);
                if max_pages == 0 {
                    return Err(AnalyzerError::validation("maxPages must be at least 1"));
                }
                Ok(GraphSource::Crawl {
                    start_url,
                    max_pages,
                })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Outcome of one analysis request
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub source: AnalysisSource,
    pub graph: LinkGraph,
    pub analysis: LinkAnalysis,
    /// ID under which a freshly crawled graph was stored
    pub crawl_id: Option<String>,
    /// ID of the stored snapshot; `None` if persisting it failed
    pub analysis_id: Option<String>,
}

/// Runs analyses against shared storage and configuration
#[derive(Clone)]
pub struct Analyzer {
    storage: Arc<Mutex<SqliteStorage>>,
    config: Arc<Config>,
    client: Client,
    config_hash: String,
}

impl Analyzer {
    pub fn new(
        storage: Arc<Mutex<SqliteStorage>>,
        config: Arc<Config>,
        client: Client,
        config_hash: String,
    ) -> Self {
        Self {
            storage,
            config,
            client,
            config_hash,
        }
    }

    /// Opens the configured database and builds the HTTP client
    pub fn from_config(config: Config, config_hash: String) -> Result<Self> {
        let storage = open_storage(Path::new(&config.storage.database_path))?;
        let timeout = Duration::from_millis(config.crawler.request_timeout_ms);
        let client = build_http_client(&config.user_agent, timeout)?;
        Ok(Self::new(
            Arc::new(Mutex::new(storage)),
            Arc::new(config),
            client,
            config_hash,
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Runs one storage operation under the lock
    ///
    /// The guard never outlives this call, so it is never held across an
    /// await point.
    pub fn with_storage<T>(
        &self,
        f: impl FnOnce(&mut SqliteStorage) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut storage = lock_storage(&self.storage)?;
        f(&mut storage)
    }

    /// Runs one storage operation on the blocking thread pool
    ///
    /// Used for writes whose size grows with the crawl, so large snapshots
    /// do not stall the async workers.
    pub async fn with_storage_blocking<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteStorage) -> StorageResult<T> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || {
            let mut storage = lock_storage(&storage)?;
            f(&mut storage)
        })
        .await
        .map_err(|e| StorageError::Database(format!("storage task failed: {}", e)))?
    }

    /// Validates a request, obtains its graph, analyzes it and persists the result
    pub async fn run(&self, request: AnalyzeRequest) -> Result<AnalysisOutcome> {
        let source = request.into_source(self.config.crawler.max_pages)?;

        let (graph, root, analysis_source, crawl_id) = match source {
            GraphSource::Stored { crawl_id } => {
                let graph = self.load_graph(&crawl_id)?;
                (graph, None, AnalysisSource::Crawl(crawl_id), None)
            }
            GraphSource::Crawl {
                start_url,
                max_pages,
            } => {
                let root = normalize_url(&start_url)?.to_string();
                let graph = self.crawl(&start_url, max_pages).await?;
                let crawl_id = self.save_crawl_best_effort(&root, &graph).await;
                (graph, Some(root), AnalysisSource::StartUrl(start_url), crawl_id)
            }
        };

        let analysis = analyze_graph(
            &graph,
            root.as_deref(),
            AnalysisParams::from(&self.config.analysis),
        )?;

        let analysis_id = self
            .save_analysis_best_effort(&analysis_source, &analysis, &graph)
            .await;

        Ok(AnalysisOutcome {
            source: analysis_source,
            graph,
            analysis,
            crawl_id,
            analysis_id,
        })
    }

    /// Loads a stored graph; any failure surfaces as "Crawl not found"
    pub fn load_graph(&self, crawl_id: &str) -> Result<LinkGraph> {
        match self.with_storage(|s| s.load_crawl(crawl_id)) {
            Ok(Some(record)) => {
                tracing::info!(
                    "Loaded crawl {} ({} pages, {} links)",
                    crawl_id,
                    record.graph.len(),
                    record.graph.edge_count()
                );
                Ok(record.graph)
            }
            Ok(None) => Err(AnalyzerError::upstream("Crawl not found")),
            Err(e) => {
                tracing::error!("Failed to load crawl {}: {}", crawl_id, e);
                Err(AnalyzerError::upstream("Crawl not found"))
            }
        }
    }

    /// Crawls a site with this analyzer's HTTP client
    pub async fn crawl(&self, start_url: &str, max_pages: usize) -> Result<LinkGraph> {
        let mut crawler = Crawler::with_client(self.client.clone(), &self.config.crawler);
        crawler.crawl(start_url, max_pages).await
    }

    /// Stores a graph as a crawl and returns its ID
    pub fn store_graph(&self, start_url: &str, graph: &LinkGraph) -> Result<String> {
        Ok(self.with_storage(|s| s.save_crawl(start_url, graph))?)
    }

    async fn save_crawl_best_effort(&self, start_url: &str, graph: &LinkGraph) -> Option<String> {
        let owned_url = start_url.to_string();
        let graph = graph.clone();
        let result = self
            .with_storage_blocking(move |s| s.save_crawl(&owned_url, &graph))
            .await;

        match result {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!("Failed to store crawl of {}: {}", start_url, e);
                None
            }
        }
    }

    async fn save_analysis_best_effort(
        &self,
        source: &AnalysisSource,
        analysis: &LinkAnalysis,
        graph: &LinkGraph,
    ) -> Option<String> {
        let owned_source = source.clone();
        let root_url = analysis.root.clone();
        let config_hash = self.config_hash.clone();
        let report = analysis.report.clone();
        let pages = analysis.pages.clone();
        let graph = graph.clone();

        let result = self
            .with_storage_blocking(move |s| {
                s.save_analysis(&AnalysisSnapshot {
                    source: &owned_source,
                    root_url: &root_url,
                    config_hash: &config_hash,
                    report: &report,
                    pages: &pages,
                    graph: &graph,
                })
            })
            .await;

        match result {
            Ok(id) => {
                tracing::info!("Stored analysis {} for {}", id, source);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Failed to store analysis for {}: {}", source, e);
                None
            }
        }
    }
}

fn lock_storage(
    storage: &Mutex<SqliteStorage>,
) -> StorageResult<MutexGuard<'_, SqliteStorage>> {
    storage
        .lock()
        .map_err(|_| StorageError::Database("storage lock poisoned".to_string()))
}
