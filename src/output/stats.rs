//! Console output and statistics
//!
//! This module provides functionality for displaying analysis results and
//! storage statistics on stdout.

use crate::analysis::AnalysisReport;
use crate::graph::PageRecord;
use crate::state::Depth;
use crate::storage::{AnalysisListing, Storage, StorageResult};
use std::collections::BTreeMap;

/// Counts of stored items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStatistics {
    pub crawls: u64,
    pub analyses: u64,
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<StorageStatistics> {
    Ok(StorageStatistics {
        crawls: storage.count_crawls()?,
        analyses: storage.count_analyses()?,
    })
}

/// Number of pages at each depth, shallowest first, unreachable last
pub fn depth_breakdown(pages: &[PageRecord]) -> Vec<(Depth, usize)> {
    let mut reachable: BTreeMap<u32, usize> = BTreeMap::new();
    let mut unreachable = 0usize;

    for page in pages {
        match page.depth {
            Depth::Reachable(hops) => *reachable.entry(hops).or_insert(0) += 1,
            Depth::Unreachable => unreachable += 1,
        }
    }

    let mut breakdown: Vec<(Depth, usize)> = reachable
        .into_iter()
        .map(|(hops, count)| (Depth::Reachable(hops), count))
        .collect();
    if unreachable > 0 {
        breakdown.push((Depth::Unreachable, unreachable));
    }
    breakdown
}

/// Prints an analysis report to stdout in a formatted manner
pub fn print_analysis_summary(report: &AnalysisReport, analysis_id: Option<&str>) {
    let summary = &report.summary;

    println!("=== Internal Link Analysis ===\n");

    println!("Overview:");
    println!("  Total pages: {}", summary.total_pages);
    println!("  Total links: {}", summary.total_links);
    println!("  Avg inbound links: {:.1}", summary.avg_inbound_links);
    println!("  Avg outbound links: {:.1}", summary.avg_outbound_links);
    println!("  Max depth: {}", summary.max_depth);
    println!("  Avg depth: {:.1}", summary.avg_depth);
    println!();

    println!("Classification:");
    println!("  Orphaned pages: {}", summary.orphaned_pages);
    println!("  Hubs: {}", summary.hub_pages);
    println!("  Authorities: {}", summary.authority_pages);
    println!();

    if !report.top_pages.is_empty() {
        println!("Top Pages:");
        for (rank, page) in report.top_pages.iter().enumerate() {
            println!(
                "  {:>2}. [{:>3}] {} ({} inbound)",
                rank + 1,
                page.link_score,
                page.url,
                page.inbound_links
            );
        }
        println!();
    }

    if !report.orphaned_pages.is_empty() {
        println!("Orphaned Pages ({}):", report.orphaned_pages.len());
        for page in &report.orphaned_pages {
            println!("  - {} (depth {})", page.url, page.depth);
        }
        println!();
    }

    match analysis_id {
        Some(id) => println!("Analysis stored as {}", id),
        None => println!("Analysis was not stored"),
    }
}

/// Prints stored analyses, newest first
pub fn print_analysis_list(listing: &[AnalysisListing], stats: &StorageStatistics) {
    println!(
        "=== Stored Analyses ({} analyses, {} crawls) ===\n",
        stats.analyses, stats.crawls
    );

    if listing.is_empty() {
        println!("No analyses stored yet.");
        return;
    }

    for entry in listing {
        println!(
            "{}  {}  {} pages, {} links  {} ({})",
            entry.id,
            entry.created_at,
            entry.total_pages,
            entry.total_links,
            entry.root_url,
            entry.source
        );
    }
}
