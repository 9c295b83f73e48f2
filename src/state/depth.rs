use serde::{Deserialize, Serialize};
use std::fmt;

/// Click depth of a page from the analysis root
///
/// Unreachable pages are a distinct variant rather than a large sentinel
/// number, so they can never leak into max/average depth arithmetic.
/// Serialized as a number, or `null` when unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum Depth {
    Reachable(u32),
    Unreachable,
}

impl Depth {
    pub const ROOT: Depth = Depth::Reachable(0);

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }

    /// Returns the hop count for reachable pages
    pub fn hops(&self) -> Option<u32> {
        match self {
            Self::Reachable(n) => Some(*n),
            Self::Unreachable => None,
        }
    }

    /// Keeps the shallower of two depths; any finite depth beats `Unreachable`
    pub fn min(self, other: Depth) -> Depth {
        match (self, other) {
            (Self::Reachable(a), Self::Reachable(b)) => Self::Reachable(a.min(b)),
            (Self::Reachable(a), Self::Unreachable) | (Self::Unreachable, Self::Reachable(a)) => {
                Self::Reachable(a)
            }
            (Self::Unreachable, Self::Unreachable) => Self::Unreachable,
        }
    }
}

impl From<Option<u32>> for Depth {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Depth::Unreachable, Depth::Reachable)
    }
}

impl From<Depth> for Option<u32> {
    fn from(depth: Depth) -> Self {
        depth.hops()
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachable(n) => write!(f, "{}", n),
            Self::Unreachable => f.write_str("unreachable"),
        }
    }
}
