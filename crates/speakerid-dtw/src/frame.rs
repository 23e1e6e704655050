//! Fixed-size MFCC feature vector.

use std::ops::Index;

use crate::error::FrameError;

/// Number of MFCC coefficients carried by every frame.
pub const MFCC_COEFFICIENTS: usize = 13;

/// One time step of acoustic features. Guaranteed to hold exactly
/// [`MFCC_COEFFICIENTS`] finite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame([f64; MFCC_COEFFICIENTS]);

impl Frame {
    /// Create a frame, validating that every coefficient is finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`FrameError::NonFiniteCoefficient`] | Any coefficient is NaN or infinite |
    pub fn new(coefficients: [f64; MFCC_COEFFICIENTS]) -> Result<Self, FrameError> {
        if let Some(index) = coefficients.iter().position(|v| !v.is_finite()) {
            return Err(FrameError::NonFiniteCoefficient { index });
        }
        Ok(Self(coefficients))
    }

    /// Create a frame with every coefficient set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::NonFiniteCoefficient`] if `value` is not finite.
    pub fn splat(value: f64) -> Result<Self, FrameError> {
        Self::new([value; MFCC_COEFFICIENTS])
    }

    /// Return the coefficients in order.
    #[must_use]
    pub fn coefficients(&self) -> &[f64; MFCC_COEFFICIENTS] {
        &self.0
    }
}

impl TryFrom<&[f64]> for Frame {
    type Error = FrameError;

    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`FrameError::CoefficientCount`] | `values.len() != 13` |
    /// | [`FrameError::NonFiniteCoefficient`] | Any value is NaN or infinite |
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let coefficients: [f64; MFCC_COEFFICIENTS] =
            values.try_into().map_err(|_| FrameError::CoefficientCount {
                expected: MFCC_COEFFICIENTS,
                got: values.len(),
            })?;
        Self::new(coefficients)
    }
}

impl Index<usize> for Frame {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f64]> for Frame {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
