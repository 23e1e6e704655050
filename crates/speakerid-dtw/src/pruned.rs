//! Banded (Sakoe-Chiba style) DTW alignment cost.

use tracing::instrument;

use crate::aligner::Aligner;
use crate::constraint::BandConstraint;
use crate::convention::Convention;
use crate::cost::AlignmentCost;
use crate::frame::Frame;
use crate::metric::frame_distance;
use crate::sequence::SequenceView;

/// DTW aligner that evaluates only a diagonal band of the cost matrix.
///
/// The band radius defaults to the length difference of the two sequences.
/// Runs in O(m * w) time after allocating two rows of length n + 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrunedDtwAligner {
    band: BandConstraint,
    convention: Convention,
}

impl PrunedDtwAligner {
    /// Create a pruned aligner with a `|m - n|` band and the legacy convention.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the band constraint.
    #[must_use]
    pub fn with_band(mut self, band: BandConstraint) -> Self {
        self.band = band;
        self
    }

    /// Replace the recurrence convention.
    #[must_use]
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// Return the band constraint.
    #[must_use]
    pub fn band(&self) -> BandConstraint {
        self.band
    }

    /// Return the recurrence convention.
    #[must_use]
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Compute the banded alignment cost of `a` against `b`.
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(m = a.len(), n = b.len(), band = ?self.band))]
    pub fn align_pruned(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> AlignmentCost {
        let radius = self.band.radius(a.len(), b.len());
        let cost = match self.convention {
            Convention::Legacy => Self::legacy(a.as_slice(), b.as_slice(), radius),
            Convention::Textbook => Self::textbook(a.as_slice(), b.as_slice(), radius),
        };
        AlignmentCost::new(cost)
    }

    /// Legacy banded recurrence over a one-based `(m+1) x (n+1)` matrix whose
    /// cells all start at 0:
    ///
    /// `D[i][j] = d(a[i-1], b[j-1]) + min(D[i-1][j], D[i-1][j-1])`
    ///
    /// for rows `1..m` only. Cells outside the band are never written and
    /// keep their zero, which band-edge cells read through `min`. The result
    /// is `D[m-1][n-1]`.
    ///
    /// Only the band of each row is touched: before a row is computed, the
    /// buffer is cleared over the columns its previous occupant wrote.
    fn legacy(a: &[Frame], b: &[Frame], radius: usize) -> f64 {
        let m = a.len();
        let n = b.len();
        let mut prev = vec![0.0_f64; n + 1];
        let mut curr = vec![0.0_f64; n + 1];
        // band of the row held in `prev`, and of the stale row in `curr`
        let mut written = 0..0;
        let mut stale = 0..0;

        for i in 1..m {
            curr[stale.clone()].fill(0.0);
            let cols = BandConstraint::column_range(i, radius, n);
            for j in cols.clone() {
                curr[j] = frame_distance(&a[i - 1], &b[j - 1]) + prev[j].min(prev[j - 1]);
            }
            std::mem::swap(&mut prev, &mut curr);
            stale = std::mem::replace(&mut written, cols);
        }

        prev[n - 1]
    }

    /// Textbook banded recurrence: `D[0][0] = 0`, every other cell starts at
    /// infinity, rows `1..=m`, three predecessors, result `D[m][n]`.
    fn textbook(a: &[Frame], b: &[Frame], radius: usize) -> f64 {
        let n = b.len();
        let mut prev = vec![f64::INFINITY; n + 1];
        let mut curr = vec![f64::INFINITY; n + 1];
        prev[0] = 0.0;
        let mut written = 0..1;
        let mut stale = 0..0;

        for (row, frame_a) in a.iter().enumerate() {
            let i = row + 1;
            curr[stale.clone()].fill(f64::INFINITY);
            let cols = BandConstraint::column_range(i, radius, n);
            for j in cols.clone() {
                let best = prev[j].min(prev[j - 1]).min(curr[j - 1]);
                curr[j] = frame_distance(frame_a, &b[j - 1]) + best;
            }
            std::mem::swap(&mut prev, &mut curr);
            stale = std::mem::replace(&mut written, cols);
        }

        prev[n]
    }
}

impl Aligner for PrunedDtwAligner {
    fn align(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> AlignmentCost {
        self.align_pruned(a, b)
    }
}
