//! Aligner interface and strategy selection.

use std::fmt;

use crate::constraint::BandConstraint;
use crate::convention::Convention;
use crate::cost::AlignmentCost;
use crate::dtw::DtwAligner;
use crate::pruned::PrunedDtwAligner;
use crate::sequence::SequenceView;

/// Computes an alignment cost between two sequences.
pub trait Aligner {
    /// Cost of time-warping `a` onto `b`.
    fn align(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> AlignmentCost;
}

/// Which aligner a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignerKind {
    /// [`DtwAligner`] over the full matrix.
    Full,
    /// [`PrunedDtwAligner`] over a diagonal band.
    Banded,
}

impl fmt::Display for AlignerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Banded => f.write_str("banded"),
        }
    }
}

/// A configured aligner of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full-matrix alignment.
    Full(DtwAligner),
    /// Banded alignment.
    Banded(PrunedDtwAligner),
}

impl Strategy {
    /// Build a strategy for `kind`. `band` only affects [`AlignerKind::Banded`].
    #[must_use]
    pub fn new(kind: AlignerKind, convention: Convention, band: BandConstraint) -> Self {
        match kind {
            AlignerKind::Full => Self::Full(DtwAligner::with_convention(convention)),
            AlignerKind::Banded => Self::Banded(
                PrunedDtwAligner::new()
                    .with_convention(convention)
                    .with_band(band),
            ),
        }
    }

    /// Return the kind of aligner this strategy runs.
    #[must_use]
    pub fn kind(&self) -> AlignerKind {
        match self {
            Self::Full(_) => AlignerKind::Full,
            Self::Banded(_) => AlignerKind::Banded,
        }
    }
}

impl From<AlignerKind> for Strategy {
    fn from(kind: AlignerKind) -> Self {
        Self::new(kind, Convention::default(), BandConstraint::default())
    }
}

impl Aligner for Strategy {
    fn align(&self, a: SequenceView<'_>, b: SequenceView<'_>) -> AlignmentCost {
        match self {
            Self::Full(dtw) => dtw.align(a, b),
            Self::Banded(pruned) => pruned.align_pruned(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Sequence;

    fn seq(levels: &[f64]) -> Sequence {
        Sequence::from_rows(levels.iter().map(|&v| [v; 13])).unwrap()
    }

    #[test]
    fn strategy_kind_roundtrip() {
        assert_eq!(Strategy::from(AlignerKind::Full).kind(), AlignerKind::Full);
        assert_eq!(Strategy::from(AlignerKind::Banded).kind(), AlignerKind::Banded);
    }

    #[test]
    fn strategy_dispatches_to_matching_aligner() {
        let a = seq(&[5.0, 1.0, 3.0]);
        let b = seq(&[0.0, 4.0, 2.0]);

        let full = Strategy::from(AlignerKind::Full).align(a.as_view(), b.as_view());
        assert_eq!(full, DtwAligner::new().align(a.as_view(), b.as_view()));

        let banded = Strategy::from(AlignerKind::Banded).align(a.as_view(), b.as_view());
        assert_eq!(banded, PrunedDtwAligner::new().align_pruned(a.as_view(), b.as_view()));
        assert_ne!(full, banded);
    }

    #[test]
    fn band_is_ignored_by_full_strategy() {
        let s = Strategy::new(AlignerKind::Full, Convention::Legacy, BandConstraint::Radius(0));
        assert_eq!(s, Strategy::Full(DtwAligner::new()));
    }

    #[test]
    fn display_names() {
        assert_eq!(AlignerKind::Full.to_string(), "full");
        assert_eq!(AlignerKind::Banded.to_string(), "banded");
    }
}
