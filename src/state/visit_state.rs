/// Visit state definitions for the breadth-first depth traversal
///
/// Every page starts `Unvisited`, becomes `Enqueued` when a link to it is
/// first followed, and ends `Visited` once it has been dequeued.
use std::fmt;

/// Represents the traversal state of a page during depth computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitState {
    /// Page has not been reached yet
    Unvisited,

    /// Page is waiting in the queue
    Enqueued,

    /// Page has been dequeued and its depth is final
    Visited,
}

impl VisitState {
    /// Returns true if no further processing will happen for this page
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Visited)
    }

    /// Returns true if a link to this page should still be followed
    ///
    /// Pages already waiting in the queue are enqueued again; the FIFO order
    /// guarantees the earliest (shallowest) entry is dequeued first.
    pub fn should_enqueue(&self) -> bool {
        !self.is_terminal()
    }

    /// Checks if a transition to another state is valid
    ///
    /// A page may be enqueued more than once by different predecessors before
    /// it is dequeued; only the first dequeue counts.
    pub fn can_transition_to(&self, target: VisitState) -> bool {
        matches!(
            (self, target),
            (Self::Unvisited, Self::Enqueued)
                | (Self::Enqueued, Self::Enqueued)
                | (Self::Enqueued, Self::Visited)
        )
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unvisited => "unvisited",
            Self::Enqueued => "enqueued",
            Self::Visited => "visited",
        };
        f.write_str(name)
    }
}
