//! Accuracy regression tests for speakerid-match.
//!
//! Synthetic speakers are drawn as noisy copies of a per-speaker prototype so
//! that the nearest template is known in advance.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use speakerid_dtw::{AlignerKind, Convention, Sequence};
use speakerid_match::{MatcherConfig, SpeakerLabel, TemplateCorpus, identify};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn prototype(rng: &mut ChaCha8Rng, len: usize) -> Vec<[f64; 13]> {
    (0..len)
        .map(|_| {
            let mut row = [0.0; 13];
            for c in &mut row {
                *c = rng.gen_range(-30.0..30.0);
            }
            row
        })
        .collect()
}

fn noisy(rng: &mut ChaCha8Rng, base: &[[f64; 13]], noise: f64) -> Sequence {
    Sequence::from_rows(base.iter().map(|row| {
        let mut out = *row;
        for c in &mut out {
            *c += rng.gen_range(-noise..noise);
        }
        out
    }))
    .expect("valid noisy sequence")
}

fn synthetic_corpus(
    rng: &mut ChaCha8Rng,
    n_speakers: usize,
    per_speaker: usize,
) -> (TemplateCorpus, Vec<(SpeakerLabel, Vec<[f64; 13]>)>) {
    let mut corpus = TemplateCorpus::new();
    let mut prototypes = Vec::new();
    for s in 0..n_speakers {
        let label = SpeakerLabel::new(format!("speaker{s}")).expect("valid label");
        let base = prototype(rng, 20);
        for _ in 0..per_speaker {
            corpus.push(label.clone(), noisy(rng, &base, 1.0));
        }
        prototypes.push((label, base));
    }
    (corpus, prototypes)
}

// ---------------------------------------------------------------------------
// a) well-separated speakers are identified perfectly
// ---------------------------------------------------------------------------

#[test]
fn separated_speakers_identified() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let (corpus, prototypes) = synthetic_corpus(&mut rng, 5, 3);

    let queries: Vec<(SpeakerLabel, Sequence)> = prototypes
        .iter()
        .map(|(label, base)| (label.clone(), noisy(&mut rng, base, 1.0)))
        .collect();

    for kind in [AlignerKind::Full, AlignerKind::Banded] {
        for convention in [Convention::Legacy, Convention::Textbook] {
            let matcher = MatcherConfig::new(kind).with_convention(convention).build();
            let evaluation = matcher.evaluate(&queries, &corpus).expect("evaluation");
            assert_eq!(
                evaluation.correct(),
                queries.len(),
                "{kind}/{convention}: accuracy {}",
                evaluation.accuracy()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// b) parallel and sequential scans agree
// ---------------------------------------------------------------------------

#[test]
fn parallel_matches_sequential() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (corpus, prototypes) = synthetic_corpus(&mut rng, 4, 4);

    for (_, base) in &prototypes {
        let query = noisy(&mut rng, base, 5.0);
        for kind in [AlignerKind::Full, AlignerKind::Banded] {
            let par = MatcherConfig::new(kind).build().identify(&query, &corpus).unwrap();
            let seq = MatcherConfig::new(kind)
                .with_parallel(false)
                .build()
                .identify(&query, &corpus)
                .unwrap();
            assert_eq!(par, seq);

            let par_rank = MatcherConfig::new(kind).build().rank(&query, &corpus, 4).unwrap();
            let seq_rank = MatcherConfig::new(kind)
                .with_parallel(false)
                .build()
                .rank(&query, &corpus, 4)
                .unwrap();
            assert_eq!(par_rank, seq_rank);
        }
    }
}

// ---------------------------------------------------------------------------
// c) two-frame scenario through the public entry point
// ---------------------------------------------------------------------------

#[test]
fn zero_templates_versus_unit_query() {
    let label = SpeakerLabel::new("A").unwrap();
    let mut corpus = TemplateCorpus::new();
    for _ in 0..3 {
        corpus.push(label.clone(), Sequence::from_rows(vec![[0.0; 13]; 2]).unwrap());
    }
    let query = Sequence::from_rows(vec![[1.0; 13]; 2]).unwrap();

    for kind in [AlignerKind::Full, AlignerKind::Banded] {
        let id = identify(&query, &corpus, kind).unwrap();
        assert_eq!(id.label, label);
        assert!((id.cost.value() - 13.0_f64.sqrt()).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// d) ranking lists every speaker once
// ---------------------------------------------------------------------------

#[test]
fn rank_covers_each_speaker_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let (corpus, prototypes) = synthetic_corpus(&mut rng, 6, 2);
    let query = noisy(&mut rng, &prototypes[3].1, 1.0);

    let matcher = MatcherConfig::new(AlignerKind::Full).build();
    let ranked = matcher.rank(&query, &corpus, 100).unwrap();
    assert_eq!(ranked.len(), 6);
    assert_eq!(ranked[0].label, prototypes[3].0);
    for pair in ranked.windows(2) {
        assert!(pair[0].cost.value() <= pair[1].cost.value());
    }
}
