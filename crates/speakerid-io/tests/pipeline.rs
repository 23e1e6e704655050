//! End-to-end integration tests: store -> load -> identify, and format conversion.

use std::fs;

use speakerid_dtw::{AlignerKind, Sequence};
use speakerid_io::{StoreFormat, append_corpus, load_corpus, save_corpus};
use speakerid_match::{MatcherConfig, SpeakerLabel, TemplateCorpus};
use tempfile::TempDir;

fn label(name: &str) -> SpeakerLabel {
    SpeakerLabel::new(name).unwrap()
}

/// Three speakers with two templates each, sitting near levels 0, 5 and 10.
fn fixture_corpus() -> TemplateCorpus {
    let mut corpus = TemplateCorpus::new();
    for (name, level) in [("low", 0.0), ("mid", 5.0), ("high", 10.0)] {
        for offset in [0.1, -0.1] {
            let rows: Vec<[f64; 13]> = (0..6)
                .map(|t| {
                    let mut row = [level + offset; 13];
                    row[t % 13] += 0.01 * t as f64;
                    row
                })
                .collect();
            corpus.push(label(name), Sequence::from_rows(rows).unwrap());
        }
    }
    corpus
}

#[test]
fn text_store_round_trip_and_identify() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Projectsequences.txt");
    let corpus = fixture_corpus();

    save_corpus(&path, &corpus).unwrap();

    // Two lines per template, label first.
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "low");
    assert_eq!(lines[1].split('#').count(), 6);
    assert_eq!(lines[1].split('#').next().unwrap().split('@').count(), 13);

    let loaded = load_corpus(&path).unwrap();
    assert_eq!(loaded, corpus);

    let query = Sequence::from_rows(vec![[5.02; 13]; 4]).unwrap();
    for kind in [AlignerKind::Full, AlignerKind::Banded] {
        let id = MatcherConfig::new(kind).build().identify(&query, &loaded).unwrap();
        assert_eq!(id.label.as_str(), "mid", "{kind} picked {}", id.label);
    }
}

#[test]
fn convert_between_formats() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("store.txt");
    let bin = dir.path().join("store.bin");
    let back = dir.path().join("back.txt");
    let corpus = fixture_corpus();

    save_corpus(&text, &corpus).unwrap();
    save_corpus(&bin, &load_corpus(&text).unwrap()).unwrap();
    save_corpus(&back, &load_corpus(&bin).unwrap()).unwrap();

    assert_eq!(StoreFormat::from_path(&bin), StoreFormat::Binary);
    assert_eq!(load_corpus(&bin).unwrap(), corpus);
    assert_eq!(
        fs::read_to_string(&text).unwrap(),
        fs::read_to_string(&back).unwrap()
    );
}

#[test]
fn append_enrols_after_existing_templates() {
    let dir = TempDir::new().unwrap();
    let mut extra = TemplateCorpus::new();
    extra.push(label("new"), Sequence::from_rows(vec![[42.0; 13]; 3]).unwrap());

    for name in ["store.txt", "store.bin"] {
        let path = dir.path().join(name);
        append_corpus(&path, &fixture_corpus()).unwrap();
        append_corpus(&path, &extra).unwrap();

        let loaded = load_corpus(&path).unwrap();
        assert_eq!(loaded.len(), 7, "{name}");
        assert_eq!(loaded.templates()[6].label.as_str(), "new");
        assert_eq!(loaded.templates()[..6], fixture_corpus().templates()[..]);
    }
}

#[test]
fn load_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.txt");
    fs::write(&path, "alice\n1@2@3\n").unwrap();

    let err = load_corpus(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.txt"), "{message}");
    assert!(message.contains("line 2"), "{message}");
}
