//! MFCC sequence alignment by Dynamic Time Warping.
//!
//! Pure math library with no I/O. Provides validated frame and sequence types,
//! the Euclidean frame metric, a full-matrix DTW aligner and a banded
//! (pruned) DTW aligner, both behind the [`Aligner`] trait.

mod aligner;
mod constraint;
mod convention;
mod cost;
mod dtw;
mod error;
mod frame;
mod metric;
mod pruned;
mod sequence;

pub use aligner::{Aligner, AlignerKind, Strategy};
pub use constraint::BandConstraint;
pub use convention::Convention;
pub use cost::AlignmentCost;
pub use dtw::DtwAligner;
pub use error::{DtwError, FrameError};
pub use frame::{Frame, MFCC_COEFFICIENTS};
pub use metric::frame_distance;
pub use pruned::PrunedDtwAligner;
pub use sequence::{Sequence, SequenceView};
