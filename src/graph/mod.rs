//! Link graph and per-page records
//!
//! This module holds the raw crawled graph and the typed records the metric
//! passes operate on:
//! - `LinkGraph`: ordered page → outbound links mapping
//! - `PageRecord` / `PageSet`: per-page metrics, one snapshot per pass
//! - `build_page_set`: the initial snapshot for a graph and root

mod builder;
mod link_graph;
mod record;

pub use builder::build_page_set;
pub use link_graph::{GraphEdge, GraphPage, LinkGraph};
pub use record::{PageClass, PageRecord, PageSet};
