//! Sumi-Linkrank: internal link graph analysis for a single website
//!
//! This crate builds a directed graph of page → outbound links (either from a
//! stored crawl or from a bounded breadth-first crawl), then computes inbound
//! link counts, click depth from a root page, a damped iterative importance
//! score, and orphan/hub/authority classifications.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod server;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Linkrank operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UpstreamFetch(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Shorthand for a validation failure with a human-readable message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a failure to obtain the link graph
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFetch(message.into())
    }

    /// Message safe to hand back to an API caller
    ///
    /// Validation and upstream errors carry messages written for the caller.
    /// Everything else is reduced to a generic description so internal
    /// details (SQL, file paths) never leave the process.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::UpstreamFetch(msg) => msg.clone(),
            Self::Url(e) => format!("Invalid URL: {}", e),
            Self::Config(_) => "Service is misconfigured".to_string(),
            Self::Reqwest(_) => "Failed to fetch the requested site".to_string(),
            Self::Storage(_) | Self::Serialization(_) | Self::Io(_) => {
                "Internal error while analyzing links".to_string()
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Sumi-Linkrank operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{analyze_graph, AnalysisParams, LinkAnalysis};
pub use config::Config;
pub use graph::{LinkGraph, PageRecord};
pub use state::{Depth, VisitState};
pub use crate::url::{extract_domain, normalize_url};
