//! Nearest-template search over a corpus.

use std::collections::HashSet;

use rayon::prelude::*;
use speakerid_dtw::{Aligner, AlignerKind, AlignmentCost, Sequence, Strategy};
use tracing::{debug, instrument};

use crate::config::MatcherConfig;
use crate::corpus::TemplateCorpus;
use crate::error::MatchError;
use crate::result::Identification;

/// Identifies the speaker of a query by aligning it against every template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateMatcher {
    strategy: Strategy,
    parallel: bool,
}

impl TemplateMatcher {
    /// Create a matcher from a configuration.
    #[must_use]
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            strategy: config.strategy(),
            parallel: config.parallel(),
        }
    }

    /// Return the aligner strategy in use.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Return the label of the template with the lowest alignment cost.
    ///
    /// The query is the first argument to the aligner and the template the
    /// second. On equal cost the template that appears first in the corpus
    /// wins, so the result does not depend on whether the scan runs in
    /// parallel. If no template is reachable the first one is returned with an
    /// infinite cost.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EmptyCorpus`] if the corpus holds no templates.
    #[instrument(skip_all, fields(kind = %self.strategy.kind(), n_templates = corpus.len()))]
    pub fn identify(
        &self,
        query: &Sequence,
        corpus: &TemplateCorpus,
    ) -> Result<Identification, MatchError> {
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let costs = self.costs(query, corpus);
        let mut best = 0;
        for (i, cost) in costs.iter().enumerate().skip(1) {
            if cost.value() < costs[best].value() {
                best = i;
            }
        }

        let template = &corpus.templates()[best];
        debug!(
            label = %template.label,
            cost = costs[best].value(),
            template_index = best,
            "best template found"
        );
        Ok(Identification {
            label: template.label.clone(),
            cost: costs[best],
            template_index: best,
        })
    }

    /// Return up to `k` speakers ordered by their best template cost.
    ///
    /// Each speaker appears once, represented by its cheapest template. Ties
    /// keep corpus order, so the first entry always agrees with
    /// [`TemplateMatcher::identify`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::InvalidTopK`] | `k == 0` |
    /// | [`MatchError::EmptyCorpus`] | Corpus holds no templates |
    #[instrument(skip_all, fields(k = k, n_templates = corpus.len()))]
    pub fn rank(
        &self,
        query: &Sequence,
        corpus: &TemplateCorpus,
        k: usize,
    ) -> Result<Vec<Identification>, MatchError> {
        if k == 0 {
            return Err(MatchError::InvalidTopK { k });
        }
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let costs = self.costs(query, corpus);
        let mut order: Vec<usize> = (0..costs.len()).collect();
        order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

        let mut seen = HashSet::new();
        let ranked: Vec<Identification> = order
            .into_iter()
            .filter(|&i| seen.insert(&corpus.templates()[i].label))
            .take(k)
            .map(|i| Identification {
                label: corpus.templates()[i].label.clone(),
                cost: costs[i],
                template_index: i,
            })
            .collect();

        debug!(n_ranked = ranked.len(), "ranking complete");
        Ok(ranked)
    }

    /// Alignment cost of `query` against each template, in corpus order.
    fn costs(&self, query: &Sequence, corpus: &TemplateCorpus) -> Vec<AlignmentCost> {
        let strategy = self.strategy;
        let align = |seq: &Sequence| strategy.align(query.as_view(), seq.as_view());
        if self.parallel {
            corpus
                .templates()
                .par_iter()
                .map(|t| align(&t.sequence))
                .collect()
        } else {
            corpus.iter().map(|t| align(&t.sequence)).collect()
        }
    }
}

/// Identify `query` against `corpus` with the default configuration for `kind`.
///
/// # Errors
///
/// Returns [`MatchError::EmptyCorpus`] if the corpus holds no templates.
pub fn identify(
    query: &Sequence,
    corpus: &TemplateCorpus,
    kind: AlignerKind,
) -> Result<Identification, MatchError> {
    MatcherConfig::new(kind).build().identify(query, corpus)
}
