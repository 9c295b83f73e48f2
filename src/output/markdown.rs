//! Markdown report generation
//!
//! This module renders a stored analysis as a human-readable markdown
//! report: summary figures, the top pages, depth distribution, and the
//! orphan, hub and authority lists.

use crate::output::{depth_breakdown, OutputResult};
use crate::storage::StoredAnalysis;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Longest list printed in full before the report truncates it
const LIST_LIMIT: usize = 50;

/// Writes the markdown report of a stored analysis to `output_path`
pub fn write_markdown_report(analysis: &StoredAnalysis, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(analysis);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a stored analysis as markdown
pub fn format_markdown_report(analysis: &StoredAnalysis) -> String {
    let report = &analysis.report;
    let summary = &report.summary;
    let mut md = String::new();

    md.push_str("# Sumi-Linkrank Internal Link Report\n\n");

    md.push_str("## Analysis Information\n\n");
    md.push_str(&format!("- **Analysis ID**: {}\n", analysis.id));
    md.push_str(&format!("- **Created**: {}\n", analysis.created_at));
    md.push_str(&format!("- **Source**: {}\n", analysis.source));
    md.push_str(&format!("- **Root URL**: {}\n", analysis.root_url));
    md.push_str(&format!("- **Config Hash**: {}\n\n", analysis.config_hash));

    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Total Pages | {} |\n", summary.total_pages));
    md.push_str(&format!("| Total Links | {} |\n", summary.total_links));
    md.push_str(&format!("| Orphaned Pages | {} |\n", summary.orphaned_pages));
    md.push_str(&format!("| Hub Pages | {} |\n", summary.hub_pages));
    md.push_str(&format!("| Authority Pages | {} |\n", summary.authority_pages));
    md.push_str(&format!(
        "| Avg Inbound Links | {:.1} |\n",
        summary.avg_inbound_links
    ));
    md.push_str(&format!(
        "| Avg Outbound Links | {:.1} |\n",
        summary.avg_outbound_links
    ));
    md.push_str(&format!("| Max Depth | {} |\n", summary.max_depth));
    md.push_str(&format!("| Avg Depth | {:.1} |\n\n", summary.avg_depth));

    if !report.top_pages.is_empty() {
        md.push_str("## Top Pages\n\n");
        md.push_str("| # | URL | Link Score | Inbound Links |\n");
        md.push_str("|---|-----|------------|---------------|\n");
        for (rank, page) in report.top_pages.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                rank + 1,
                page.url,
                page.link_score,
                page.inbound_links
            ));
        }
        md.push('\n');
    }

    let breakdown = depth_breakdown(&analysis.pages);
    if !breakdown.is_empty() {
        md.push_str("## Depth Breakdown\n\n");
        md.push_str("| Depth | Pages |\n");
        md.push_str("|-------|-------|\n");
        for (depth, count) in &breakdown {
            md.push_str(&format!("| {} | {} |\n", depth, count));
        }
        md.push('\n');
    }

    if !report.orphaned_pages.is_empty() {
        md.push_str("## Orphaned Pages\n\n");
        md.push_str("Pages no other crawled page links to.\n\n");
        for page in report.orphaned_pages.iter().take(LIST_LIMIT) {
            md.push_str(&format!("- {} (depth {})\n", page.url, page.depth));
        }
        push_remainder(&mut md, report.orphaned_pages.len());
    }

    if !report.hubs.is_empty() {
        md.push_str("## Hubs\n\n");
        md.push_str("| URL | Outbound Links | Link Score |\n");
        md.push_str("|-----|----------------|------------|\n");
        for page in report.hubs.iter().take(LIST_LIMIT) {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                page.url, page.outbound_links, page.link_score
            ));
        }
        push_remainder(&mut md, report.hubs.len());
    }

    if !report.authorities.is_empty() {
        md.push_str("## Authorities\n\n");
        md.push_str("| URL | Inbound Links | Link Score |\n");
        md.push_str("|-----|---------------|------------|\n");
        for page in report.authorities.iter().take(LIST_LIMIT) {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                page.url, page.inbound_links, page.link_score
            ));
        }
        push_remainder(&mut md, report.authorities.len());
    }

    md
}

fn push_remainder(md: &mut String, total: usize) {
    if total > LIST_LIMIT {
        md.push_str(&format!("\n... and {} more\n\n", total - LIST_LIMIT));
    } else {
        md.push('\n');
    }
}
