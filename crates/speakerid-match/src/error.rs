//! Error types for template matching.

/// Errors from corpus construction and identification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Returned when identification is requested against a corpus with no templates.
    #[error("template corpus is empty; nothing to compare against")]
    EmptyCorpus,

    /// Returned when evaluation is requested with no labelled queries.
    #[error("no labelled queries to evaluate")]
    NoQueries,

    /// Returned when a ranking of zero candidates is requested.
    #[error("top_k must be at least 1, got {k}")]
    InvalidTopK {
        /// The invalid k value provided.
        k: usize,
    },

    /// Returned when a speaker label is empty, padded with whitespace, or spans more than one line.
    #[error("invalid speaker label {label:?}: must be non-empty, single-line and without surrounding whitespace")]
    InvalidLabel {
        /// The rejected label.
        label: String,
    },
}
