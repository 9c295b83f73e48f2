//! Configuration module for Sumi-Linkrank
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults used by
//! the analysis service (10 rounds, damping 0.85, 100-page crawls).
//!
//! # Example
//!
//! ```no_run
//! use sumi_linkrank::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkrank.toml")).unwrap();
//! println!("Crawls are capped at {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalysisConfig, Config, CrawlerConfig, ServerConfig, StorageConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_config_content, load_config, load_config_with_hash,
    load_or_default, parse_config,
};
