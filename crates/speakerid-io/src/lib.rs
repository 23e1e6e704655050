//! Template store I/O for the speakerid pipeline.
//!
//! Two on-disk formats are supported: the line-oriented text format used by
//! the enrolment tool (a label line followed by a record line of
//! `@`-separated coefficients and `#`-separated frames) and a versioned
//! bincode envelope. [`load_corpus`] and friends pick the format from the
//! file extension.

mod binary;
mod codec;
mod error;
mod store;
mod text;

pub use codec::{COEFFICIENT_SEPARATOR, FRAME_SEPARATOR, decode_sequence, encode_sequence};
pub use error::{CodecError, IoError};
pub use store::{StoreFormat, append_corpus, load_corpus, save_corpus};
pub use text::{TemplateReader, TemplateWriter};
