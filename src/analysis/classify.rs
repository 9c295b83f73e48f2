use crate::graph::{PageClass, PageSet};

/// Multiple of the average above which a page counts as a hub or authority
pub const THRESHOLD_FACTOR: f64 = 2.0;

/// Assigns orphan, hub and authority classes to every page
///
/// Averages are taken once over the full page set, root and link-less pages
/// included, before any page is labelled. Both thresholds are strict: a page
/// at exactly twice the average is not a hub or authority.
pub fn classify(pages: PageSet) -> PageSet {
    let count = pages.len().max(1) as f64;
    let avg_outbound = pages.iter().map(|p| p.outbound_count() as f64).sum::<f64>() / count;
    let avg_inbound = pages.iter().map(|p| p.inbound_count as f64).sum::<f64>() / count;

    let hub_threshold = THRESHOLD_FACTOR * avg_outbound;
    let authority_threshold = THRESHOLD_FACTOR * avg_inbound;
    let root = pages.root().to_string();

    tracing::debug!(
        "Classifying with hub threshold {:.2} and authority threshold {:.2}",
        hub_threshold,
        authority_threshold
    );

    pages.map_records(|_, mut record| {
        let mut classes = Vec::new();
        if record.inbound_count == 0 && record.url != root {
            classes.push(PageClass::Orphaned);
        }
        if record.outbound_count() as f64 > hub_threshold {
            classes.push(PageClass::Hub);
        }
        if record.inbound_count as f64 > authority_threshold {
            classes.push(PageClass::Authority);
        }
        record.classes = classes;
        record
    })
}
