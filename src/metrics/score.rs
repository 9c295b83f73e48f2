use crate::graph::{LinkGraph, PageSet};

/// Parameters of the iterative importance score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParams {
    /// Probability mass retained when propagating score across a link
    pub damping: f64,
    /// Exact number of synchronous rounds; there is no convergence check
    pub iterations: u32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            iterations: 10,
        }
    }
}

/// Score assigned to every page when all raw scores are equal
pub const DEGENERATE_SCORE: f64 = 50.0;

/// Runs the damped power iteration over the link graph
///
/// Per round, for every page `p`:
///
/// ```text
/// new(p) = (1 - d) / N + d * Σ old(q) / outbound(q)   over pages q linking to p
/// ```
///
/// Each linking page contributes once per round no matter how many times it
/// links to `p`. Pages without outbound links simply contribute nothing;
/// their mass is not redistributed. All new scores of a round are computed
/// from the previous round before any is committed.
pub fn compute_scores(graph: &LinkGraph, pages: PageSet, params: ScoreParams) -> PageSet {
    let page_count = pages.len();
    if page_count == 0 {
        return pages;
    }

    let sources = linking_pages(graph, &pages);
    let outbound: Vec<usize> = pages.iter().map(|record| record.outbound_count()).collect();
    let base = (1.0 - params.damping) / page_count as f64;

    let mut scores: Vec<f64> = pages.iter().map(|record| record.score).collect();
    for round in 0..params.iterations {
        let next: Vec<f64> = sources
            .iter()
            .map(|linking| {
                let inflow: f64 = linking
                    .iter()
                    .filter(|&&q| outbound[q] > 0)
                    .map(|&q| scores[q] / outbound[q] as f64)
                    .sum();
                base + params.damping * inflow
            })
            .collect();
        scores = next;
        tracing::trace!("Score round {} complete", round + 1);
    }

    pages.map_records(|position, mut record| {
        record.score = scores[position];
        record
    })
}

/// Rescales scores to integers in 0..=100 relative to this run's min and max
///
/// When every page has the same score the range is empty and every page gets
/// exactly 50.
pub fn normalize_scores(pages: PageSet) -> PageSet {
    let (min, max) = pages
        .iter()
        .map(|record| record.score)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });

    let range = max - min;
    pages.map_records(|_, mut record| {
        record.score = if range == 0.0 {
            DEGENERATE_SCORE
        } else {
            (((record.score - min) / range) * 100.0).round()
        };
        record
    })
}

/// For every page, the distinct crawled pages that link to it, in key order
fn linking_pages(graph: &LinkGraph, pages: &PageSet) -> Vec<Vec<usize>> {
    let mut sources: Vec<Vec<usize>> = vec![Vec::new(); pages.len()];

    for (q, record) in pages.iter().enumerate() {
        let mut seen = Vec::new();
        for target in graph.links(&record.url).unwrap_or_default() {
            if let Some(p) = pages.position(target) {
                if !seen.contains(&p) {
                    seen.push(p);
                    sources[p].push(q);
                }
            }
        }
    }

    sources
}
