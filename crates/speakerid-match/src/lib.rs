//! Nearest-template speaker identification.
//!
//! Scans a corpus of enrolled MFCC templates with a DTW aligner and returns the
//! speaker whose template is cheapest to align with the query. Also provides
//! per-speaker ranking and labelled-query evaluation.

mod config;
mod corpus;
mod error;
mod eval;
mod label;
mod matcher;
mod result;

pub use config::MatcherConfig;
pub use corpus::{Template, TemplateCorpus};
pub use error::MatchError;
pub use label::SpeakerLabel;
pub use matcher::{TemplateMatcher, identify};
pub use result::{Evaluation, Identification, QueryOutcome, SpeakerScore};
