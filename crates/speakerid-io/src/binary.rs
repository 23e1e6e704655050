//! Binary template store via bincode.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use speakerid_dtw::{MFCC_COEFFICIENTS, Sequence};
use speakerid_match::{SpeakerLabel, TemplateCorpus};
use tracing::{debug, info, instrument};

use crate::IoError;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// Versioned envelope for the serialized corpus.
#[derive(Serialize, Deserialize)]
struct StoreEnvelope {
    /// Format version for compatibility checking.
    format_version: u32,
    /// Number of templates in the store.
    n_templates: usize,
    templates: Vec<StoredTemplate>,
}

#[derive(Serialize, Deserialize)]
struct StoredTemplate {
    label: String,
    frames: Vec<[f64; MFCC_COEFFICIENTS]>,
}

/// Write `corpus` to `path` as a bincode envelope.
#[instrument(skip(corpus), fields(path = %path.display(), n_templates = corpus.len()))]
pub(crate) fn save(path: &Path, corpus: &TemplateCorpus) -> Result<(), IoError> {
    let envelope = StoreEnvelope {
        format_version: FORMAT_VERSION,
        n_templates: corpus.len(),
        templates: corpus
            .iter()
            .map(|t| StoredTemplate {
                label: t.label.as_str().to_string(),
                frames: t.sequence.frames().iter().map(|f| *f.coefficients()).collect(),
            })
            .collect(),
    };

    let bytes = bincode::serialize(&envelope).map_err(|e| IoError::Serialize { source: e })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| IoError::OutputDirCreate {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, &bytes).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(size_bytes = bytes.len(), "binary store saved");
    Ok(())
}

/// Read a bincode envelope from `path` and revalidate every template.
#[instrument(fields(path = %path.display()))]
pub(crate) fn load(path: &Path) -> Result<TemplateCorpus, IoError> {
    let bytes = fs::read(path).map_err(|e| IoError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;

    let envelope: StoreEnvelope =
        bincode::deserialize(&bytes).map_err(|e| IoError::Deserialize {
            path: path.to_path_buf(),
            source: e,
        })?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(IoError::IncompatibleVersion {
            expected: FORMAT_VERSION,
            found: envelope.format_version,
            path: path.to_path_buf(),
        });
    }

    if envelope.n_templates != envelope.templates.len() {
        return Err(IoError::CorruptTemplate {
            path: path.to_path_buf(),
            index: envelope.templates.len(),
            detail: format!(
                "header declares {} templates, found {}",
                envelope.n_templates,
                envelope.templates.len()
            ),
        });
    }

    let mut corpus = TemplateCorpus::new();
    for (index, stored) in envelope.templates.into_iter().enumerate() {
        let corrupt = |detail: String| IoError::CorruptTemplate {
            path: path.to_path_buf(),
            index,
            detail,
        };
        let label = SpeakerLabel::new(stored.label).map_err(|e| corrupt(e.to_string()))?;
        let sequence = Sequence::from_rows(stored.frames).map_err(|e| corrupt(e.to_string()))?;
        corpus.push(label, sequence);
    }

    if corpus.is_empty() {
        return Err(IoError::EmptyStore {
            path: path.to_path_buf(),
        });
    }

    debug!(n_templates = corpus.len(), "binary store loaded");
    Ok(corpus)
}
