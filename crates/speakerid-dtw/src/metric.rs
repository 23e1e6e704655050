//! Per-frame dissimilarity shared by every aligner.

use crate::frame::Frame;

/// Euclidean distance over the 13 coefficients of two frames.
#[must_use]
pub fn frame_distance(a: &Frame, b: &Frame) -> f64 {
    a.coefficients()
        .iter()
        .zip(b.coefficients())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
