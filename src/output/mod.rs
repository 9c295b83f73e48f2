//! Output module for reports and console summaries
//!
//! This module handles:
//! - Generating markdown reports of stored analyses
//! - Printing analysis summaries and listings for the CLI
//! - Storage statistics

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{
    depth_breakdown, load_statistics, print_analysis_list, print_analysis_summary,
    StorageStatistics,
};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("Analysis not found: {0}")]
    AnalysisNotFound(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Loads a stored analysis and writes its markdown report
pub fn export_report(
    storage: &dyn crate::storage::Storage,
    analysis_id: &str,
    output_path: &std::path::Path,
) -> OutputResult<()> {
    let analysis = storage
        .get_analysis(analysis_id)?
        .ok_or_else(|| OutputError::AnalysisNotFound(analysis_id.to_string()))?;

    write_markdown_report(&analysis, output_path)?;
    tracing::info!(
        "Wrote report for analysis {} to {}",
        analysis_id,
        output_path.display()
    );
    Ok(())
}
