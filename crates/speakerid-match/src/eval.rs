//! Accuracy evaluation over labelled queries.

use speakerid_dtw::Sequence;
use tracing::{info, instrument};

use crate::corpus::TemplateCorpus;
use crate::error::MatchError;
use crate::label::SpeakerLabel;
use crate::matcher::TemplateMatcher;
use crate::result::{Evaluation, QueryOutcome};

impl TemplateMatcher {
    /// Identify every query and compare against its known speaker.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::NoQueries`] | `queries` is empty |
    /// | [`MatchError::EmptyCorpus`] | Corpus holds no templates |
    #[instrument(skip_all, fields(n_queries = queries.len(), n_templates = corpus.len()))]
    pub fn evaluate(
        &self,
        queries: &[(SpeakerLabel, Sequence)],
        corpus: &TemplateCorpus,
    ) -> Result<Evaluation, MatchError> {
        if queries.is_empty() {
            return Err(MatchError::NoQueries);
        }

        let mut outcomes = Vec::with_capacity(queries.len());
        for (expected, query) in queries {
            let identification = self.identify(query, corpus)?;
            outcomes.push(QueryOutcome {
                expected: expected.clone(),
                identification,
            });
        }

        let evaluation = Evaluation { outcomes };
        info!(
            correct = evaluation.correct(),
            total = evaluation.total(),
            accuracy = evaluation.accuracy(),
            "evaluation complete"
        );
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatcherConfig;
    use speakerid_dtw::AlignerKind;

    fn label(name: &str) -> SpeakerLabel {
        SpeakerLabel::new(name).unwrap()
    }

    fn levels(values: &[f64]) -> Sequence {
        Sequence::from_rows(values.iter().map(|&v| [v; 13])).unwrap()
    }

    fn corpus() -> TemplateCorpus {
        let mut corpus = TemplateCorpus::new();
        corpus.push(label("low"), levels(&[0.0, 0.0, 0.0]));
        corpus.push(label("high"), levels(&[10.0, 10.0, 10.0]));
        corpus
    }

    #[test]
    fn counts_correct_and_wrong() {
        let queries = vec![
            (label("low"), levels(&[0.5, 0.5, 0.5])),
            (label("high"), levels(&[9.5, 9.5, 9.5])),
            (label("high"), levels(&[1.0, 1.0, 1.0])),
            (label("low"), levels(&[0.0, 0.0, 0.0])),
        ];
        let matcher = MatcherConfig::new(AlignerKind::Full).build();
        let evaluation = matcher.evaluate(&queries, &corpus()).unwrap();

        assert_eq!(evaluation.total(), 4);
        assert_eq!(evaluation.correct(), 3);
        assert!((evaluation.accuracy() - 0.75).abs() < 1e-12);
        assert!(!evaluation.outcomes[2].is_correct());

        let per_speaker = evaluation.per_speaker();
        let high = per_speaker[&label("high")];
        assert_eq!((high.correct, high.total), (1, 2));
        assert!((high.accuracy() - 0.5).abs() < 1e-12);
        assert_eq!(per_speaker[&label("low")].correct, 2);
    }

    #[test]
    fn no_queries_is_rejected() {
        let matcher = MatcherConfig::new(AlignerKind::Banded).build();
        let err = matcher.evaluate(&[], &corpus()).unwrap_err();
        assert_eq!(err, MatchError::NoQueries);
    }

    #[test]
    fn empty_corpus_propagates() {
        let matcher = MatcherConfig::new(AlignerKind::Full).build();
        let queries = vec![(label("low"), levels(&[0.0]))];
        let err = matcher.evaluate(&queries, &TemplateCorpus::new()).unwrap_err();
        assert_eq!(err, MatchError::EmptyCorpus);
    }
}
