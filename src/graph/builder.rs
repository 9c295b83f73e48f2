use crate::graph::{LinkGraph, PageRecord, PageSet};
use crate::state::Depth;
use crate::AnalyzerError;

/// Creates one record per crawled page
///
/// The root is the explicit start URL when given, otherwise the first page
/// of the graph. Only the root starts at depth 0; everything else starts
/// unreachable until the depth pass reaches it. An explicit root that was
/// never crawled leaves every page unreachable.
///
/// # Errors
///
/// Returns `AnalyzerError::Validation` for an empty graph.
pub fn build_page_set(graph: &LinkGraph, root: Option<&str>) -> Result<PageSet, AnalyzerError> {
    let root = match root.or_else(|| graph.first_url()) {
        Some(root) if !graph.is_empty() => root.to_string(),
        _ => return Err(AnalyzerError::validation("no pages to analyze")),
    };

    let records = graph
        .pages()
        .map(|page| {
            let depth = if page.url == root {
                Depth::ROOT
            } else {
                Depth::Unreachable
            };
            PageRecord::new(page.url.clone(), page.links.clone(), depth)
        })
        .collect();

    tracing::debug!("Built {} page records rooted at {}", graph.len(), root);

    Ok(PageSet::new(root, records))
}
