//! Band constraint for the pruned aligner.

use std::ops::Range;

/// Width of the diagonal band evaluated by
/// [`PrunedDtwAligner`](crate::PrunedDtwAligner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BandConstraint {
    /// Radius equal to the length difference `|m - n|` of the two sequences.
    #[default]
    LengthDifference,

    /// Fixed radius: cell (i, j) is evaluated only if |i - j| <= radius.
    Radius(usize),
}

impl BandConstraint {
    /// Resolve the band radius for sequences of length `m` and `n`.
    #[must_use]
    pub fn radius(&self, m: usize, n: usize) -> usize {
        match self {
            Self::LengthDifference => m.abs_diff(n),
            Self::Radius(r) => *r,
        }
    }

    /// Return the evaluated columns of `row` in a one-based `(m+1) x (n+1)`
    /// matrix: the intersection of `[row - r, row + r]` with `[1, n]`.
    ///
    /// Empty when the band leaves the matrix entirely. The range always lies
    /// within `0..=n + 1`, so it can index a row buffer of length `n + 1`.
    #[must_use]
    pub fn column_range(row: usize, radius: usize, n: usize) -> Range<usize> {
        let end = row.saturating_add(radius).min(n) + 1;
        let start = row.saturating_sub(radius).max(1).min(end);
        start..end
    }
}
