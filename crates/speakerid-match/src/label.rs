//! Speaker label newtype.

use std::fmt;

use crate::error::MatchError;

/// Identifier of an enrolled speaker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeakerLabel(String);

impl SpeakerLabel {
    /// Create a label from a non-empty, single-line name.
    ///
    /// Leading and trailing whitespace is rejected rather than trimmed, so a
    /// label survives a text store round trip unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidLabel`] if `name` is empty, blank,
    /// padded with whitespace, or contains a line break.
    pub fn new(name: impl Into<String>) -> Result<Self, MatchError> {
        let name = name.into();
        if name.is_empty() || name.trim() != name || name.contains(['\n', '\r']) {
            return Err(MatchError::InvalidLabel { label: name });
        }
        Ok(Self(name))
    }

    /// Return the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeakerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
