//! Record codec for the text store.
//!
//! A record is one line: frames separated by [`FRAME_SEPARATOR`], the 13
//! coefficients of a frame separated by [`COEFFICIENT_SEPARATOR`]. No
//! separator trails the last frame or coefficient.

use speakerid_dtw::{Frame, Sequence};

use crate::error::CodecError;

/// Separates frames within a record.
pub const FRAME_SEPARATOR: char = '#';

/// Separates coefficients within a frame.
pub const COEFFICIENT_SEPARATOR: char = '@';

/// Encode a sequence as a single record line.
///
/// Coefficients use Rust's shortest round-trip `f64` formatting, so
/// [`decode_sequence`] recovers every value bit-exactly.
#[must_use]
pub fn encode_sequence(sequence: &Sequence) -> String {
    let mut record = String::new();
    for (i, frame) in sequence.frames().iter().enumerate() {
        if i > 0 {
            record.push(FRAME_SEPARATOR);
        }
        for (j, c) in frame.coefficients().iter().enumerate() {
            if j > 0 {
                record.push(COEFFICIENT_SEPARATOR);
            }
            record.push_str(&c.to_string());
        }
    }
    record
}

/// Decode a record line into a sequence.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`CodecError::Empty`] | Blank record |
/// | [`CodecError::Coefficient`] | A coefficient is not a number |
/// | [`CodecError::Frame`] | Wrong coefficient count or non-finite value |
pub fn decode_sequence(record: &str) -> Result<Sequence, CodecError> {
    let record = record.trim();
    if record.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut frames = Vec::new();
    for (frame, chunk) in record.split(FRAME_SEPARATOR).enumerate() {
        let mut values = Vec::with_capacity(13);
        for (index, raw) in chunk.split(COEFFICIENT_SEPARATOR).enumerate() {
            let value: f64 = raw.trim().parse().map_err(|_| CodecError::Coefficient {
                frame,
                index,
                raw: raw.to_string(),
            })?;
            values.push(value);
        }
        let parsed = Frame::try_from(values.as_slice())
            .map_err(|source| CodecError::Frame { frame, source })?;
        frames.push(parsed);
    }

    Sequence::new(frames).map_err(|_| CodecError::Empty)
}
