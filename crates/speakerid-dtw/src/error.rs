//! Error types for frame and sequence validation.

/// Errors from constructing a single MFCC frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Returned when a frame does not carry exactly 13 coefficients.
    #[error("frame must have {expected} coefficients, got {got}")]
    CoefficientCount {
        /// Required coefficient count.
        expected: usize,
        /// Number of coefficients supplied.
        got: usize,
    },

    /// Returned when a coefficient is NaN, infinity, or negative infinity.
    #[error("frame contains non-finite coefficient at index {index}")]
    NonFiniteCoefficient {
        /// Position of the first non-finite coefficient.
        index: usize,
    },
}

/// Errors from sequence construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when a sequence has no frames.
    #[error("sequence must contain at least one frame")]
    EmptySequence,

    /// Returned when one frame of a sequence fails validation.
    #[error("invalid frame at index {frame}")]
    InvalidFrame {
        /// Zero-based position of the offending frame.
        frame: usize,
        /// Underlying frame error.
        #[source]
        source: FrameError,
    },
}
