//! Line-oriented text template store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use speakerid_match::{SpeakerLabel, TemplateCorpus};
use tracing::{debug, info, instrument};

use crate::codec::{decode_sequence, encode_sequence};
use crate::IoError;

/// Reads a template corpus from a text store.
///
/// Expected format, repeated once per template:
/// - a line holding the speaker label
/// - a line holding the encoded sequence (see [`crate::encode_sequence`])
///
/// Blank lines between records are ignored.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::InvalidLabel`] | Label line fails validation |
/// | [`IoError::MissingRecord`] | File ends after a label line |
/// | [`IoError::Decode`] | Record line is malformed |
/// | [`IoError::EmptyStore`] | Zero records |
pub struct TemplateReader {
    path: PathBuf,
}

impl TemplateReader {
    /// Create a new reader for the given store path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the store, returning its templates in file order.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<TemplateCorpus, IoError> {
        let content = fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let mut corpus = TemplateCorpus::new();
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        while let Some((label_line, name)) = lines.next() {
            let label = SpeakerLabel::new(name.trim()).map_err(|e| IoError::InvalidLabel {
                path: self.path.clone(),
                line: label_line,
                source: e,
            })?;

            let (record_line, record) = lines.next().ok_or_else(|| IoError::MissingRecord {
                path: self.path.clone(),
                line: label_line,
            })?;

            let sequence = decode_sequence(record).map_err(|e| IoError::Decode {
                path: self.path.clone(),
                line: record_line,
                source: e,
            })?;
            debug!(label = %label, frames = sequence.len(), line = label_line, "read template");
            corpus.push(label, sequence);
        }

        if corpus.is_empty() {
            return Err(IoError::EmptyStore {
                path: self.path.clone(),
            });
        }

        info!(
            n_templates = corpus.len(),
            n_speakers = corpus.speakers().len(),
            "template store loaded"
        );

        Ok(corpus)
    }
}

/// Writes a template corpus to a text store.
///
/// Creates the parent directory on write if it does not exist.
pub struct TemplateWriter {
    path: PathBuf,
}

impl TemplateWriter {
    /// Create a new writer targeting the given store path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Replace the store with `corpus`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::OutputDirCreate`] | Parent directory cannot be created |
    /// | [`IoError::WriteFile`] | File cannot be written |
    #[instrument(skip_all, fields(path = %self.path.display(), n_templates = corpus.len()))]
    pub fn write(&self, corpus: &TemplateCorpus) -> Result<(), IoError> {
        self.emit(corpus, false)?;
        info!("template store written");
        Ok(())
    }

    /// Append `corpus` after any records already in the store.
    ///
    /// The file is created if missing.
    ///
    /// # Errors
    ///
    /// Same as [`TemplateWriter::write`].
    #[instrument(skip_all, fields(path = %self.path.display(), n_templates = corpus.len()))]
    pub fn append(&self, corpus: &TemplateCorpus) -> Result<(), IoError> {
        self.emit(corpus, true)?;
        info!("templates appended");
        Ok(())
    }

    fn emit(&self, corpus: &TemplateCorpus, append: bool) -> Result<(), IoError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| IoError::OutputDirCreate {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let write_err = |e| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&self.path)
            .map_err(write_err)?;
        let unterminated = append && ends_without_newline(&mut file).map_err(write_err)?;

        let mut out = BufWriter::new(file);
        if unterminated {
            writeln!(out).map_err(write_err)?;
        }
        for template in corpus {
            writeln!(out, "{}", template.label).map_err(write_err)?;
            writeln!(out, "{}", encode_sequence(&template.sequence)).map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;
        debug!(append, unterminated, "records flushed");
        Ok(())
    }
}

/// True if `file` is non-empty and its last byte is not a line feed.
fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakerid_dtw::Sequence;
    use tempfile::{NamedTempFile, TempDir};

    fn write_store(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn record(values: &[&str]) -> String {
        values
            .iter()
            .map(|v| vec![*v; 13].join("@"))
            .collect::<Vec<_>>()
            .join("#")
    }

    #[test]
    fn read_two_templates() {
        let content = format!(
            "alice\n{}\nbob\n{}\n",
            record(&["0", "0"]),
            record(&["1.5", "2", "3"])
        );
        let f = write_store(&content);
        let corpus = TemplateReader::new(f.path()).read().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.templates()[0].label.as_str(), "alice");
        assert_eq!(corpus.templates()[1].sequence.len(), 3);
        assert_eq!(corpus.templates()[1].sequence.frames()[0][0], 1.5);
    }

    #[test]
    fn crlf_and_blank_lines_tolerated() {
        let content = format!("alice\r\n{}\r\n\r\nbob\r\n{}\r\n", record(&["1"]), record(&["2"]));
        let f = write_store(&content);
        let corpus = TemplateReader::new(f.path()).read().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.templates()[1].label.as_str(), "bob");
    }

    #[test]
    fn missing_file() {
        let err = TemplateReader::new(Path::new("/nonexistent/store.txt"))
            .read()
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn empty_store() {
        let f = write_store("\n\n");
        let err = TemplateReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::EmptyStore { .. }));
    }

    #[test]
    fn orphan_label() {
        let content = format!("alice\n{}\nbob\n", record(&["1"]));
        let f = write_store(&content);
        let err = TemplateReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::MissingRecord { line: 3, .. }));
    }

    #[test]
    fn malformed_record_reports_line() {
        let content = format!("alice\n{}\nbob\n1@2\n", record(&["1"]));
        let f = write_store(&content);
        let err = TemplateReader::new(f.path()).read().unwrap_err();
        assert!(matches!(err, IoError::Decode { line: 4, .. }));
    }

    #[test]
    fn write_then_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.txt");
        let writer = TemplateWriter::new(&path);

        let mut first = TemplateCorpus::new();
        first.push(
            SpeakerLabel::new("alice").unwrap(),
            Sequence::from_rows(vec![[0.1; 13]; 2]).unwrap(),
        );
        writer.write(&first).unwrap();

        let mut second = TemplateCorpus::new();
        second.push(
            SpeakerLabel::new("bob").unwrap(),
            Sequence::from_rows(vec![[-7.25; 13]]).unwrap(),
        );
        writer.append(&second).unwrap();

        let corpus = TemplateReader::new(&path).read().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.templates()[0], first.templates()[0]);
        assert_eq!(corpus.templates()[1], second.templates()[0]);

        writer.write(&second).unwrap();
        assert_eq!(TemplateReader::new(&path).read().unwrap().len(), 1);
    }

    #[test]
    fn append_after_unterminated_last_line() {
        let f = write_store(&format!("alice\n{}", record(&["1"])));
        let mut extra = TemplateCorpus::new();
        extra.push(
            SpeakerLabel::new("bob").unwrap(),
            Sequence::from_rows(vec![[2.0; 13]]).unwrap(),
        );
        TemplateWriter::new(f.path()).append(&extra).unwrap();

        let corpus = TemplateReader::new(f.path()).read().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.templates()[0].sequence.frames()[0][0], 1.0);
        assert_eq!(corpus.templates()[1], extra.templates()[0]);
    }

    #[test]
    fn append_to_empty_file_adds_no_blank_line() {
        let f = write_store("");
        let mut extra = TemplateCorpus::new();
        extra.push(
            SpeakerLabel::new("bob").unwrap(),
            Sequence::from_rows(vec![[2.0; 13]]).unwrap(),
        );
        TemplateWriter::new(f.path()).append(&extra).unwrap();
        let content = fs::read_to_string(f.path()).unwrap();
        assert!(content.starts_with("bob\n"));
    }
}
