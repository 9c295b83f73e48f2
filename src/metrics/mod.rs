//! Metric passes over the page records
//!
//! Each pass takes the previous `PageSet` snapshot and returns a new one:
//! 1. `count_inbound` - inbound link counts from a single pass over edges
//! 2. `compute_depths` - breadth-first click depth from the root
//! 3. `compute_scores` - fixed-round damped power iteration
//! 4. `normalize_scores` - min-max rescaling to 0..=100

mod depth;
mod inbound;
mod score;

pub use depth::compute_depths;
pub use inbound::count_inbound;
pub use score::{compute_scores, normalize_scores, ScoreParams, DEGENERATE_SCORE};
