//! The crawled link graph
//!
//! A `LinkGraph` maps every crawled page URL to the ordered list of URLs its
//! HTML links to. Key order is insertion order and is meaningful: without an
//! explicit start URL, the first page becomes the analysis root.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One crawled page and the links found on it, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPage {
    pub url: String,
    pub links: Vec<String>,
}

/// A single directed edge of the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Directed graph of page → outbound link URLs
///
/// Serialized as an array of `{ "url", "links" }` objects so that key order
/// survives a round trip through JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GraphPage>", into = "Vec<GraphPage>")]
pub struct LinkGraph {
    pages: Vec<GraphPage>,
    index: HashMap<String, usize>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outbound links of a page
    ///
    /// Inserting a URL that is already present replaces its links but keeps
    /// its original position.
    pub fn insert(&mut self, url: impl Into<String>, links: Vec<String>) {
        let url = url.into();
        match self.index.get(&url) {
            Some(&position) => self.pages[position].links = links,
            None => {
                self.index.insert(url.clone(), self.pages.len());
                self.pages.push(GraphPage { url, links });
            }
        }
    }

    /// Number of crawled pages (graph keys)
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Returns true if the URL was crawled (is a key of the graph)
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Outbound links of a crawled page
    pub fn links(&self, url: &str) -> Option<&[String]> {
        self.index
            .get(url)
            .map(|&position| self.pages[position].links.as_slice())
    }

    /// First page in insertion order
    pub fn first_url(&self) -> Option<&str> {
        self.pages.first().map(|page| page.url.as_str())
    }

    /// Iterates pages in insertion order
    pub fn pages(&self) -> impl Iterator<Item = &GraphPage> {
        self.pages.iter()
    }

    /// Iterates every edge, duplicates included, in page then link order
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
        self.pages.iter().flat_map(|page| {
            page.links.iter().map(move |target| GraphEdge {
                source: page.url.as_str(),
                target: target.as_str(),
            })
        })
    }

    /// Total number of edges, counting duplicate links from the same page
    pub fn edge_count(&self) -> usize {
        self.pages.iter().map(|page| page.links.len()).sum()
    }
}

impl From<Vec<GraphPage>> for LinkGraph {
    fn from(pages: Vec<GraphPage>) -> Self {
        let mut graph = LinkGraph::new();
        for page in pages {
            graph.insert(page.url, page.links);
        }
        graph
    }
}

impl From<LinkGraph> for Vec<GraphPage> {
    fn from(graph: LinkGraph) -> Self {
        graph.pages
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<String>)> for LinkGraph {
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut graph = LinkGraph::new();
        for (url, links) in iter {
            graph.insert(url, links);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let graph: LinkGraph = vec![
            ("https://example.com/z", links(&[])),
            ("https://example.com/a", links(&[])),
        ]
        .into_iter()
        .collect();

        assert_eq!(graph.first_url(), Some("https://example.com/z"));
        let urls: Vec<&str> = graph.pages().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/z", "https://example.com/a"]);
    }

    #[test]
    fn test_reinsert_replaces_links_in_place() {
        let mut graph = LinkGraph::new();
        graph.insert("a", links(&["b"]));
        graph.insert("b", links(&[]));
        graph.insert("a", links(&["b", "c"]));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.first_url(), Some("a"));
        assert_eq!(graph.links("a").unwrap().len(), 2);
    }

    #[test]
    fn test_edges_keep_duplicates() {
        let mut graph = LinkGraph::new();
        graph.insert("a", links(&["b", "b", "c"]));
        graph.insert("b", links(&["a"]));

        assert_eq!(graph.edge_count(), 4);
        let to_b = graph.edges().filter(|e| e.target == "b").count();
        assert_eq!(to_b, 2);
    }

    #[test]
    fn test_json_keeps_order() {
        let mut graph = LinkGraph::new();
        graph.insert("https://example.com/z", links(&["https://example.com/a"]));
        graph.insert("https://example.com/a", links(&[]));

        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.starts_with(r#"[{"url":"https://example.com/z""#));

        let back: LinkGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_uncrawled_target_is_not_a_key() {
        let mut graph = LinkGraph::new();
        graph.insert("a", links(&["missing"]));

        assert!(graph.contains("a"));
        assert!(!graph.contains("missing"));
        assert!(graph.links("missing").is_none());
    }
}
