//! Crawler module for building a link graph from a seed URL
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with a per-request timeout
//! - HTML parsing and link extraction
//! - Frontier management and fixed-delay pacing
//! - The bounded breadth-first crawl loop

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchResult};
pub use parser::extract_links;
pub use scheduler::{Frontier, Pacer};

use crate::config::Config;
use crate::graph::LinkGraph;
use crate::Result;

/// Runs a complete crawl operation
///
/// Convenience entry point that builds a fresh `Crawler` from the config and
/// crawls `start_url` with the config's default page cap when `max_pages`
/// is `None`.
pub async fn crawl(config: &Config, start_url: &str, max_pages: Option<usize>) -> Result<LinkGraph> {
    let mut crawler = Crawler::new(config)?;
    crawler
        .crawl(start_url, max_pages.unwrap_or(config.crawler.max_pages))
        .await
}
