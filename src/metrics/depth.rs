use crate::graph::{LinkGraph, PageSet};
use crate::state::{Depth, VisitState};
use std::collections::VecDeque;

/// Computes click depth from the root with a breadth-first traversal
///
/// # Traversal Rules
///
/// - The root is enqueued at depth 0
/// - A dequeued page that is already visited is skipped
/// - Otherwise it becomes visited and keeps `min(existing, arrival)` depth
/// - Every outbound link to a crawled, not yet visited page is enqueued at depth + 1
///
/// With a FIFO queue the first dequeue of a page always carries its shortest
/// distance, so the `min` never lowers a finished depth. Pages never dequeued
/// stay `Depth::Unreachable`.
pub fn compute_depths(graph: &LinkGraph, pages: PageSet) -> PageSet {
    let mut states = vec![VisitState::Unvisited; pages.len()];
    let mut depths: Vec<Depth> = pages.iter().map(|record| record.depth).collect();
    let mut queue: VecDeque<(usize, u32)> = VecDeque::new();

    match pages.position(pages.root()) {
        Some(root) => {
            states[root] = VisitState::Enqueued;
            queue.push_back((root, 0));
        }
        None => {
            tracing::debug!("Root {} was not crawled; no page is reachable", pages.root());
        }
    }

    while let Some((position, arrival)) = queue.pop_front() {
        if states[position].is_terminal() {
            continue;
        }
        states[position] = VisitState::Visited;
        depths[position] = depths[position].min(Depth::Reachable(arrival));

        let url = &pages.records()[position].url;
        for target in graph.links(url).unwrap_or_default() {
            let Some(next) = pages.position(target) else {
                continue;
            };
            if states[next].should_enqueue() {
                states[next] = VisitState::Enqueued;
                queue.push_back((next, arrival + 1));
            }
        }
    }

    let reached = states.iter().filter(|s| s.is_terminal()).count();
    tracing::debug!("Depth traversal reached {} of {} pages", reached, pages.len());

    pages.map_records(|position, mut record| {
        record.depth = if states[position].is_terminal() {
            depths[position]
        } else {
            Depth::Unreachable
        };
        record
    })
}
