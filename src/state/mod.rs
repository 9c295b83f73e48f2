//! State module for the depth traversal
//!
//! # Components
//!
//! - `VisitState`: Tracks each page through the breadth-first traversal (unvisited, enqueued, visited)
//! - `Depth`: Final click depth of a page, or unreachable

mod depth;
mod visit_state;

// Re-export main types
pub use depth::Depth;
pub use visit_state::VisitState;
