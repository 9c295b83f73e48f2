use crate::graph::{LinkGraph, PageSet};

/// Counts inbound links for every page
///
/// One pass over all edges. Each edge adds one to its target, so a page that
/// links to the same target twice contributes two. Edges whose target was
/// never crawled are dropped.
pub fn count_inbound(graph: &LinkGraph, pages: PageSet) -> PageSet {
    let mut counts = vec![0u32; pages.len()];
    let mut dropped = 0usize;

    for edge in graph.edges() {
        match pages.position(edge.target) {
            Some(position) => counts[position] += 1,
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!("Ignored {} edges to uncrawled pages", dropped);
    }

    pages.map_records(|position, mut record| {
        record.inbound_count = counts[position];
        record
    })
}
