use crate::state::Depth;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural role assigned to a page after all metrics are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageClass {
    /// Non-root page that nothing in the graph links to
    Orphaned,
    /// Page linking out far more than average
    Hub,
    /// Page linked to far more than average
    Authority,
}

/// Per-page link metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub url: String,
    pub outbound_links: Vec<String>,
    pub inbound_count: u32,
    pub score: f64,
    pub depth: Depth,
    #[serde(default)]
    pub classes: Vec<PageClass>,
}

impl PageRecord {
    /// A fresh record before any metric pass has run
    pub fn new(url: impl Into<String>, outbound_links: Vec<String>, depth: Depth) -> Self {
        Self {
            url: url.into(),
            outbound_links,
            inbound_count: 0,
            score: 1.0,
            depth,
            classes: Vec::new(),
        }
    }

    /// Number of outbound links, duplicates included
    pub fn outbound_count(&self) -> usize {
        self.outbound_links.len()
    }

    pub fn has_class(&self, class: PageClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn is_orphaned(&self) -> bool {
        self.has_class(PageClass::Orphaned)
    }

    pub fn is_hub(&self) -> bool {
        self.has_class(PageClass::Hub)
    }

    pub fn is_authority(&self) -> bool {
        self.has_class(PageClass::Authority)
    }

    /// Normalized score as the integer reported to callers
    pub fn link_score(&self) -> u32 {
        self.score.round().clamp(0.0, 100.0) as u32
    }
}

/// Snapshot of every page record for one analysis, in graph key order
///
/// Each metric pass consumes a `PageSet` and returns the next snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSet {
    root: String,
    records: Vec<PageRecord>,
    index: HashMap<String, usize>,
}

impl PageSet {
    pub(crate) fn new(root: String, records: Vec<PageRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.url.clone(), position))
            .collect();
        Self {
            root,
            records,
            index,
        }
    }

    /// URL of the root page depths are measured from
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.position(url).map(|position| &self.records[position])
    }

    /// Index of a page in key order, if it has a record
    pub fn position(&self, url: &str) -> Option<usize> {
        self.index.get(url).copied()
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.iter()
    }

    /// Builds the next snapshot by rewriting every record
    pub(crate) fn map_records<F>(self, mut f: F) -> Self
    where
        F: FnMut(usize, PageRecord) -> PageRecord,
    {
        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(position, record)| f(position, record))
            .collect();
        Self {
            root: self.root,
            records,
            index: self.index,
        }
    }

    pub fn into_records(self) -> Vec<PageRecord> {
        self.records
    }
}
