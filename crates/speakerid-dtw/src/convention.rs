//! Boundary and step-pattern conventions of the cost recurrence.

use std::fmt;

/// How an aligner seeds its cost matrix and which predecessors it considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Convention {
    /// Behaviour of the enrolled-template tooling this engine replaces.
    ///
    /// Every boundary cell starts at 0, cells outside the band stay 0, only
    /// the vertical and diagonal predecessors are considered, and the result
    /// is read from `(m-1, n-1)`. Templates scored with earlier releases keep
    /// their costs under this convention.
    #[default]
    Legacy,

    /// Standard DTW: infinite cost outside the path origin, vertical,
    /// diagonal and horizontal predecessors, result at the true end cell.
    Textbook,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Textbook => f.write_str("textbook"),
        }
    }
}
