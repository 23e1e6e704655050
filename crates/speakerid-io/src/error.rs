//! I/O error types for speakerid-io.

use std::path::PathBuf;

use speakerid_dtw::FrameError;
use speakerid_match::MatchError;

/// Errors from decoding a single text record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Returned when the record line is blank.
    #[error("record contains no frames")]
    Empty,

    /// Returned when a coefficient is not a decimal number.
    #[error("frame {frame}, coefficient {index}: cannot parse \"{raw}\"")]
    Coefficient {
        /// Zero-based frame position.
        frame: usize,
        /// Zero-based coefficient position within the frame.
        index: usize,
        /// The raw text that failed to parse.
        raw: String,
    },

    /// Returned when a parsed frame fails validation.
    #[error("frame {frame} is invalid")]
    Frame {
        /// Zero-based frame position.
        frame: usize,
        /// Underlying frame error.
        #[source]
        source: FrameError,
    },
}

/// Errors from reading and writing template stores.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a record line cannot be decoded into a sequence.
    #[error("malformed record in {path} at line {line}")]
    Decode {
        /// Path to the store.
        path: PathBuf,
        /// One-based line number of the record.
        line: usize,
        /// Underlying decode error.
        source: CodecError,
    },

    /// Returned when a label line is not followed by a record line.
    #[error("label at line {line} of {path} has no record line")]
    MissingRecord {
        /// Path to the store.
        path: PathBuf,
        /// One-based line number of the orphaned label.
        line: usize,
    },

    /// Returned when a label line holds an unusable speaker label.
    #[error("invalid label in {path} at line {line}")]
    InvalidLabel {
        /// Path to the store.
        path: PathBuf,
        /// One-based line number of the label.
        line: usize,
        /// Underlying label error.
        source: MatchError,
    },

    /// Returned when a store holds zero templates.
    #[error("empty template store (no records) in {path}")]
    EmptyStore {
        /// Path to the store.
        path: PathBuf,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a store file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when bincode encoding of the store fails.
    #[error("failed to serialize template store")]
    Serialize {
        /// Underlying bincode error.
        source: bincode::Error,
    },

    /// Returned when bincode decoding of the store fails.
    #[error("failed to deserialize template store from {path}")]
    Deserialize {
        /// Path to the store.
        path: PathBuf,
        /// Underlying bincode error.
        source: bincode::Error,
    },

    /// Returned when a binary store was written by an incompatible format version.
    #[error("incompatible store version in {path}: expected {expected}, found {found}")]
    IncompatibleVersion {
        /// Format version this build reads.
        expected: u32,
        /// Format version recorded in the file.
        found: u32,
        /// Path to the store.
        path: PathBuf,
    },

    /// Returned when a decoded binary template fails revalidation.
    #[error("corrupt template {index} in {path}: {detail}")]
    CorruptTemplate {
        /// Path to the store.
        path: PathBuf,
        /// Zero-based template position.
        index: usize,
        /// What failed to validate.
        detail: String,
    },
}
