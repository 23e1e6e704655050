//! Format-agnostic store entry points.

use std::fmt;
use std::path::Path;

use speakerid_match::TemplateCorpus;
use tracing::debug;

use crate::text::{TemplateReader, TemplateWriter};
use crate::{IoError, binary};

/// On-disk layout of a template store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// Label line plus `@`/`#` record line per template.
    Text,
    /// Versioned bincode envelope.
    Binary,
}

impl StoreFormat {
    /// Pick the format from the file extension: `.bin` is binary, anything
    /// else is text.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Load a corpus from `path` in the format implied by its extension.
///
/// # Errors
///
/// Any [`IoError`] raised by the text or binary reader.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<TemplateCorpus, IoError> {
    let path = path.as_ref();
    let format = StoreFormat::from_path(path);
    debug!(path = %path.display(), %format, "loading store");
    match format {
        StoreFormat::Text => TemplateReader::new(path).read(),
        StoreFormat::Binary => binary::load(path),
    }
}

/// Write `corpus` to `path`, replacing any existing store.
///
/// # Errors
///
/// Any [`IoError`] raised by the text or binary writer.
pub fn save_corpus(path: impl AsRef<Path>, corpus: &TemplateCorpus) -> Result<(), IoError> {
    let path = path.as_ref();
    match StoreFormat::from_path(path) {
        StoreFormat::Text => TemplateWriter::new(path).write(corpus),
        StoreFormat::Binary => binary::save(path, corpus),
    }
}

/// Add `corpus` after the templates already stored at `path`, creating the
/// store if it does not exist.
///
/// Text stores are appended in place. Binary stores are read, extended and
/// rewritten.
///
/// # Errors
///
/// Any [`IoError`] raised while reading the existing store or writing the
/// result.
pub fn append_corpus(path: impl AsRef<Path>, corpus: &TemplateCorpus) -> Result<(), IoError> {
    let path = path.as_ref();
    match StoreFormat::from_path(path) {
        StoreFormat::Text => TemplateWriter::new(path).append(corpus),
        StoreFormat::Binary => {
            let mut merged = if path.exists() {
                binary::load(path)?
            } else {
                TemplateCorpus::new()
            };
            merged.extend(corpus.iter().cloned());
            binary::save(path, &merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(StoreFormat::from_path(Path::new("a/b.bin")), StoreFormat::Binary);
        assert_eq!(StoreFormat::from_path(Path::new("B.BIN")), StoreFormat::Binary);
        assert_eq!(StoreFormat::from_path(Path::new("store.txt")), StoreFormat::Text);
        assert_eq!(StoreFormat::from_path(Path::new("store")), StoreFormat::Text);
    }
}
