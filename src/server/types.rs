//! JSON bodies of the HTTP API

use crate::analysis::{AnalysisOutcome, AnalysisReport};
use serde::{Deserialize, Serialize};

/// Successful analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
    pub data: AnalysisData,
    pub message: String,
}

/// The report plus the ID of the stored snapshot, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    #[serde(flatten)]
    pub report: AnalysisReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl SuccessBody {
    pub fn from_outcome(outcome: AnalysisOutcome) -> Self {
        let summary = &outcome.analysis.report.summary;
        let message = format!(
            "Analyzed {} pages with {} internal links",
            summary.total_pages, summary.total_links
        );

        Self {
            success: true,
            data: AnalysisData {
                report: outcome.analysis.report,
                analysis_id: outcome.analysis_id,
            },
            message,
        }
    }
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
