//! Summary statistics and ranked page lists

use crate::graph::{PageRecord, PageSet};
use crate::state::Depth;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Aggregate figures for one analyzed graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_pages: usize,
    /// Sum of all outbound list lengths, duplicates included
    pub total_links: usize,
    pub orphaned_pages: usize,
    pub hub_pages: usize,
    pub authority_pages: usize,
    pub avg_inbound_links: f64,
    pub avg_outbound_links: f64,
    /// Deepest reachable page; 0 when only the root is reachable
    pub max_depth: u32,
    /// Mean depth over reachable pages only
    pub avg_depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedPage {
    pub url: String,
    pub depth: Depth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubPage {
    pub url: String,
    pub outbound_links: usize,
    pub link_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityPage {
    pub url: String,
    pub inbound_links: u32,
    pub link_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPage {
    pub url: String,
    pub link_score: u32,
    pub inbound_links: u32,
}

/// Everything reported back to the caller about one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub orphaned_pages: Vec<OrphanedPage>,
    pub hubs: Vec<HubPage>,
    pub authorities: Vec<AuthorityPage>,
    pub top_pages: Vec<TopPage>,
}

/// Builds the summary and page lists from a classified page set
///
/// Orphan, hub and authority lists keep graph key order.
pub fn build_report(pages: &PageSet, top_n: usize) -> AnalysisReport {
    let orphaned_pages = pages
        .iter()
        .filter(|p| p.is_orphaned())
        .map(|p| OrphanedPage {
            url: p.url.clone(),
            depth: p.depth,
        })
        .collect();

    let hubs = pages
        .iter()
        .filter(|p| p.is_hub())
        .map(|p| HubPage {
            url: p.url.clone(),
            outbound_links: p.outbound_count(),
            link_score: p.link_score(),
        })
        .collect();

    let authorities = pages
        .iter()
        .filter(|p| p.is_authority())
        .map(|p| AuthorityPage {
            url: p.url.clone(),
            inbound_links: p.inbound_count,
            link_score: p.link_score(),
        })
        .collect();

    AnalysisReport {
        summary: summarize(pages),
        orphaned_pages,
        hubs,
        authorities,
        top_pages: top_pages(pages, top_n),
    }
}

/// Computes the aggregate summary
pub fn summarize(pages: &PageSet) -> AnalysisSummary {
    let total_pages = pages.len();
    let count = total_pages.max(1) as f64;

    let total_links: usize = pages.iter().map(PageRecord::outbound_count).sum();
    let total_inbound: u64 = pages.iter().map(|p| u64::from(p.inbound_count)).sum();

    let reachable: Vec<u32> = pages.iter().filter_map(|p| p.depth.hops()).collect();
    let max_depth = reachable.iter().copied().max().unwrap_or(0);
    let avg_depth = if reachable.is_empty() {
        0.0
    } else {
        reachable.iter().map(|&d| f64::from(d)).sum::<f64>() / reachable.len() as f64
    };

    AnalysisSummary {
        total_pages,
        total_links,
        orphaned_pages: pages.iter().filter(|p| p.is_orphaned()).count(),
        hub_pages: pages.iter().filter(|p| p.is_hub()).count(),
        authority_pages: pages.iter().filter(|p| p.is_authority()).count(),
        avg_inbound_links: round1(total_inbound as f64 / count),
        avg_outbound_links: round1(total_links as f64 / count),
        max_depth,
        avg_depth: round1(avg_depth),
    }
}

/// The `n` highest-scoring pages, ties broken by ascending URL
pub fn top_pages(pages: &PageSet, n: usize) -> Vec<TopPage> {
    let mut ranked: Vec<&PageRecord> = pages.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.url.cmp(&b.url))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|p| TopPage {
            url: p.url.clone(),
            link_score: p.link_score(),
            inbound_links: p.inbound_count,
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
