//! The analysis pipeline
//!
//! `analyze_graph` runs every pass in order over one link graph:
//! build records → inbound counts → depths → scores → normalization →
//! classification → report. `service` wraps it with graph loading, crawling
//! and best-effort persistence.

mod classify;
mod report;
pub mod service;

pub use classify::{classify, THRESHOLD_FACTOR};
pub use report::{
    build_report, summarize, top_pages, AnalysisReport, AnalysisSummary, AuthorityPage, HubPage,
    OrphanedPage, TopPage,
};
pub use service::{AnalysisOutcome, AnalyzeRequest, Analyzer, GraphSource};

use crate::config::AnalysisConfig;
use crate::graph::{build_page_set, LinkGraph, PageRecord};
use crate::metrics::{compute_depths, compute_scores, count_inbound, normalize_scores, ScoreParams};
use crate::Result;

/// Tunables for one analysis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    pub score: ScoreParams,
    /// Length of the top pages ranking
    pub top_pages: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            score: ScoreParams::default(),
            top_pages: 10,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            score: ScoreParams {
                damping: config.damping,
                iterations: config.iterations,
            },
            top_pages: config.top_pages,
        }
    }
}

/// Result of analyzing one link graph
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnalysis {
    /// URL depths were measured from
    pub root: String,
    /// Final per-page records, in graph key order
    pub pages: Vec<PageRecord>,
    pub report: AnalysisReport,
}

/// Runs the full pipeline over a link graph
///
/// # Errors
///
/// Returns `AnalyzerError::Validation` if the graph has no pages.
pub fn analyze_graph(
    graph: &LinkGraph,
    root: Option<&str>,
    params: AnalysisParams,
) -> Result<LinkAnalysis> {
    let pages = build_page_set(graph, root)?;
    let pages = count_inbound(graph, pages);
    let pages = compute_depths(graph, pages);
    let pages = compute_scores(graph, pages, params.score);
    let pages = normalize_scores(pages);
    let pages = classify(pages);

    let report = build_report(&pages, params.top_pages);
    tracing::info!(
        "Analyzed {} pages with {} links ({} orphaned, {} hubs, {} authorities)",
        report.summary.total_pages,
        report.summary.total_links,
        report.summary.orphaned_pages,
        report.summary.hub_pages,
        report.summary.authority_pages
    );

    Ok(LinkAnalysis {
        root: pages.root().to_string(),
        pages: pages.into_records(),
        report,
    })
}
