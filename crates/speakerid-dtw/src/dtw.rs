//! Unconstrained DTW alignment cost.

use tracing::instrument;

use crate::aligner::Aligner;
use crate::convention::Convention;
use crate::cost::AlignmentCost;
use crate::frame::Frame;
use crate::metric::frame_distance;
use crate::sequence::SequenceView;

/// Full-matrix DTW aligner. Immutable, thread-safe and copyable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DtwAligner {
    convention: Convention,
}

impl DtwAligner {
    /// Create an aligner using the [`Convention::Legacy`] recurrence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aligner using the given convention.
    #[must_use]
    pub fn with_convention(convention: Convention) -> Self {
        Self { convention }
    }

    /// Return the recurrence convention.
    #[must_use]
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Legacy recurrence over an `m x n` matrix with a zero first row and
    /// column:
    ///
    /// `D[i][j] = d(a[i], b[j]) + min(D[i-1][j], D[i-1][j-1])`
    ///
    /// Runs with a rolling two-row buffer. `curr[0]` is never written and
    /// stays at the zero boundary.
    fn legacy(a: &[Frame], b: &[Frame]) -> f64 {
        let n = b.len();
        let mut prev = vec![0.0_f64; n];
        let mut curr = vec![0.0_f64; n];

        for frame_a in &a[1..] {
            for j in 1..n {
                curr[j] = frame_distance(frame_a, &b[j]) + prev[j].min(prev[j - 1]);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[n - 1]
    }

    /// Textbook recurrence: `D[0][0] = d(a[0], b[0])`, every other cell takes
    /// the cheapest of above, diagonal and left.
    fn textbook(a: &[Frame], b: &[Frame]) -> f64 {
        let n = b.len();
        let mut prev = vec![f64::INFINITY; n];
        let mut curr = vec![f64::INFINITY; n];

        for (i, frame_a) in a.iter().enumerate() {
            for j in 0..n {
                let best = if i == 0 && j == 0 {
                    0.0
                } else {
                    let above = prev[j];
                    let diag = if j > 0 { prev[j - 1] } else { f64::INFINITY };
                    let left = if j > 0 { curr[j - 1] } else { f64::INFINITY };
                    above.min(diag).min(left)
                };
                curr[j] = frame_distance(frame_a, &b[j]) + best;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[n - 1]
    }
}

impl Aligner for DtwAligner {
    /// Cost of time-warping `a` onto `b` over the full matrix.
    ///
    /// O(m * n) time, O(n) space.
    #[instrument(level = "trace", skip_all, fields(m = a.len(), n = b.len()))]
    fn align(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> AlignmentCost {
        let cost = match self.convention {
            Convention::Legacy => Self::legacy(a.as_slice(), b.as_slice()),
            Convention::Textbook => Self::textbook(a.as_slice(), b.as_slice()),
        };
        AlignmentCost::new(cost)
    }
}
