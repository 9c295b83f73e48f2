//! Crawl frontier and request pacing
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be fetched
//! - Deduplication of URLs already enqueued or fetched
//! - A fixed minimum delay between consecutive requests

use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Breadth-first queue of URLs to fetch
///
/// A URL is accepted at most once for the lifetime of the frontier, so a
/// page is never fetched twice within one crawl.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    seen: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it was already seen
    ///
    /// Returns `true` if the URL was added.
    pub fn push(&mut self, url: Url) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Takes the oldest queued URL
    pub fn pop(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Number of URLs still waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs ever accepted
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

/// Fixed-delay pacing between requests to the crawled site
///
/// After every fetch completes, the next request waits a full `delay`, no
/// matter how long the fetch itself took. The first request is never
/// delayed.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    last_finished: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_finished: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Time left before the next request may start
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_finished {
            Some(last) => self.delay.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Waits until the pause after the previous fetch has elapsed
    pub async fn wait_turn(&self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            tracing::trace!("Pacing: waiting {:?} before next request", remaining);
            tokio::time::sleep(remaining).await;
        }
    }

    /// Records that a fetch has just completed
    pub fn fetch_finished(&mut self) {
        self.last_finished = Some(Instant::now());
    }
}
