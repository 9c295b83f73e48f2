//! Crawler coordinator - bounded breadth-first crawl of one site
//!
//! This module contains the crawl loop that turns a seed URL into a
//! `LinkGraph`:
//! - Managing the frontier queue
//! - Pacing and fetching pages one at a time
//! - Extracting, normalizing and filtering links to the seed's site

use crate::config::{Config, CrawlerConfig};
use crate::crawler::scheduler::{Frontier, Pacer};
use crate::crawler::{build_http_client, extract_links, fetch_url, FetchResult};
use crate::graph::LinkGraph;
use crate::url::{internal_link, normalize_url};
use crate::{AnalyzerError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Sequential, page-capped crawler for a single site
pub struct Crawler {
    client: Client,
    pacer: Pacer,
    max_pages_limit: usize,
}

impl Crawler {
    /// Creates a crawler with its own HTTP client built from the config
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.crawler.request_timeout_ms);
        let client = build_http_client(&config.user_agent, timeout)?;
        Ok(Self::with_client(client, &config.crawler))
    }

    /// Creates a crawler that reuses an existing HTTP client
    pub fn with_client(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            pacer: Pacer::new(Duration::from_millis(config.fetch_delay_ms)),
            max_pages_limit: config.max_pages_limit,
        }
    }

    /// Crawls the site of `start_url`, fetching at most `max_pages` pages
    ///
    /// # Crawl Rules
    ///
    /// 1. The normalized seed is the first graph key
    /// 2. Pages are fetched one at a time in breadth-first order
    /// 3. Only links on the seed's site are recorded and followed
    /// 4. An HTML page becomes a key with its internal links, duplicates kept
    /// 5. A non-HTML page becomes a key with no links
    /// 6. A failed page is logged and skipped; there are no retries
    ///
    /// `max_pages` is clamped to `1..=max-pages-limit`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::Url` for an invalid seed and
    /// `AnalyzerError::UpstreamFetch` if the seed itself cannot be fetched.
    pub async fn crawl(&mut self, start_url: &str, max_pages: usize) -> Result<LinkGraph> {
        let seed = normalize_url(start_url)?;
        let max_pages = max_pages.clamp(1, self.max_pages_limit.max(1));

        tracing::info!("Starting crawl of {} (max {} pages)", seed, max_pages);
        let start_time = Instant::now();

        let mut frontier = Frontier::new();
        frontier.push(seed.clone());

        let mut graph = LinkGraph::new();
        let mut fetched = 0usize;
        let mut failed = 0usize;

        while fetched < max_pages {
            let Some(url) = frontier.pop() else {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            };

            self.pacer.wait_turn().await;
            let result = fetch_url(&self.client, url.as_str()).await;
            self.pacer.fetch_finished();
            fetched += 1;

            match result {
                FetchResult::Html {
                    final_url, body, ..
                } => {
                    let base = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
                    let links = internal_links(&body, &base, &seed);
                    for link in &links {
                        frontier.push(link.clone());
                    }
                    tracing::debug!("Fetched {} ({} internal links)", url, links.len());
                    graph.insert(
                        url.as_str(),
                        links.iter().map(Url::to_string).collect(),
                    );
                }
                FetchResult::NotHtml { content_type } => {
                    tracing::debug!("Fetched {} as {}, no links extracted", url, content_type);
                    graph.insert(url.as_str(), Vec::new());
                }
                failure => {
                    let reason = failure.failure_reason().unwrap_or_default();
                    if url == seed {
                        return Err(AnalyzerError::upstream(format!(
                            "Failed to fetch start URL {}: {}",
                            seed, reason
                        )));
                    }
                    failed += 1;
                    tracing::warn!("Skipping {}: {}", url, reason);
                }
            }

            if fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier",
                    fetched,
                    frontier.len()
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages fetched ({} failed), {} pages in graph, {} links, in {:?}",
            fetched,
            failed,
            graph.len(),
            graph.edge_count(),
            start_time.elapsed()
        );

        Ok(graph)
    }
}

/// Extracts links from a page and keeps the normalized ones on the seed's site
fn internal_links(body: &str, base: &Url, seed: &Url) -> Vec<Url> {
    extract_links(body, base)
        .iter()
        .filter_map(|link| internal_link(link, seed))
        .collect()
}
