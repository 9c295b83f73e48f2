//! URL handling module for Sumi-Linkrank
//!
//! This module provides URL normalization and same-site checks used to decide
//! which discovered links are internal to the crawled site.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, is_same_site};
pub use normalize::normalize_url;

use ::url::Url;

/// Normalizes a link and keeps it only if it stays on the seed's site
///
/// Accepted links take the seed's host, so `www.` and bare variants of one
/// page collapse onto a single URL.
///
/// Returns `None` for unparseable links, non-HTTP schemes, and links to other
/// hosts.
pub fn internal_link(link: &str, seed: &Url) -> Option<Url> {
    let mut normalized = normalize_url(link).ok()?;
    if !is_same_site(&normalized, seed) {
        return None;
    }
    if normalized.host_str() != seed.host_str() {
        normalized.set_host(seed.host_str()).ok()?;
    }
    Some(normalized)
}
