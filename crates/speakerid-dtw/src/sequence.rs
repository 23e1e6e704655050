//! Utterance feature trajectories with validation guarantees.

use std::ops::Index;

use crate::error::DtwError;
use crate::frame::Frame;

/// Owned, validated utterance. Guaranteed non-empty; every frame is valid by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence(Vec<Frame>);

impl Sequence {
    /// Create a new sequence, validating that it is non-empty.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySequence`] | `frames` is empty |
    pub fn new(frames: Vec<Frame>) -> Result<Self, DtwError> {
        if frames.is_empty() {
            return Err(DtwError::EmptySequence);
        }
        Ok(Self(frames))
    }

    /// Build a sequence from raw coefficient rows, one row per frame.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySequence`] | `rows` yields nothing |
    /// | [`DtwError::InvalidFrame`] | A row has the wrong length or a non-finite value |
    pub fn from_rows<I, R>(rows: I) -> Result<Self, DtwError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let frames = rows
            .into_iter()
            .enumerate()
            .map(|(frame, row)| {
                Frame::try_from(row.as_ref())
                    .map_err(|source| DtwError::InvalidFrame { frame, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(frames)
    }

    /// Borrow this sequence as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SequenceView<'_> {
        SequenceView::new_unchecked(&self.0)
    }

    /// Return the frames in time order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.0
    }

    /// Return the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed sequence; kept for the
    /// `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner frames.
    #[must_use]
    pub fn into_inner(self) -> Vec<Frame> {
        self.0
    }
}

impl AsRef<[Frame]> for Sequence {
    fn as_ref(&self) -> &[Frame] {
        &self.0
    }
}

impl TryFrom<Vec<Frame>> for Sequence {
    type Error = DtwError;

    fn try_from(frames: Vec<Frame>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

/// Borrowed, validated view into a sequence.
#[derive(Debug, Clone, Copy)]
pub struct SequenceView<'a>(&'a [Frame]);

impl<'a> SequenceView<'a> {
    /// Create a view, validating that the slice is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptySequence`] if `frames` is empty.
    pub fn new(frames: &'a [Frame]) -> Result<Self, DtwError> {
        if frames.is_empty() {
            return Err(DtwError::EmptySequence);
        }
        Ok(Self(frames))
    }

    pub(crate) fn new_unchecked(frames: &'a [Frame]) -> Self {
        Self(frames)
    }

    /// Return the underlying frames.
    #[must_use]
    pub fn as_slice(&self) -> &'a [Frame] {
        self.0
    }

    /// Return the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for SequenceView<'_> {
    type Output = Frame;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
