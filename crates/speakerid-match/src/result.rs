//! Result types for identification, ranking and evaluation.

use std::collections::BTreeMap;

use speakerid_dtw::AlignmentCost;

use crate::label::SpeakerLabel;

/// The template that best matched a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    /// Speaker owning the winning template.
    pub label: SpeakerLabel,
    /// Alignment cost between the query and the winning template.
    pub cost: AlignmentCost,
    /// Position of the winning template in the corpus.
    pub template_index: usize,
}

/// Outcome of identifying one labelled query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Speaker the query is known to belong to.
    pub expected: SpeakerLabel,
    /// What the matcher returned.
    pub identification: Identification,
}

impl QueryOutcome {
    /// Return true if the matcher named the expected speaker.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.expected == self.identification.label
    }
}

/// Per-speaker tally within an [`Evaluation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeakerScore {
    /// Queries of this speaker identified correctly.
    pub correct: usize,
    /// Queries of this speaker.
    pub total: usize,
}

impl SpeakerScore {
    /// Fraction of this speaker's queries identified correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Result of identifying a set of labelled queries.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// One outcome per query, in query order.
    pub outcomes: Vec<QueryOutcome>,
}

impl Evaluation {
    /// Return the number of evaluated queries.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Return the number of correctly identified queries.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_correct()).count()
    }

    /// Fraction of queries identified correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.total() as f64
    }

    /// Tally outcomes by expected speaker.
    #[must_use]
    pub fn per_speaker(&self) -> BTreeMap<&SpeakerLabel, SpeakerScore> {
        let mut scores: BTreeMap<&SpeakerLabel, SpeakerScore> = BTreeMap::new();
        for outcome in &self.outcomes {
            let score = scores.entry(&outcome.expected).or_default();
            score.total += 1;
            if outcome.is_correct() {
                score.correct += 1;
            }
        }
        scores
    }
}
