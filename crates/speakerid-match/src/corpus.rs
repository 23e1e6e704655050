//! Enrolled template corpus.

use std::collections::HashSet;

use speakerid_dtw::Sequence;

use crate::label::SpeakerLabel;

/// One enrolled utterance of a speaker.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Speaker the utterance belongs to.
    pub label: SpeakerLabel,
    /// MFCC frames of the utterance.
    pub sequence: Sequence,
}

impl Template {
    /// Pair a label with a sequence.
    #[must_use]
    pub fn new(label: SpeakerLabel, sequence: Sequence) -> Self {
        Self { label, sequence }
    }
}

/// Ordered collection of templates. A speaker may own any number of them.
///
/// Iteration order is insertion order; the matcher resolves equal costs in
/// favour of the template inserted first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCorpus {
    templates: Vec<Template>,
}

impl TemplateCorpus {
    /// Create an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template for `label`.
    pub fn push(&mut self, label: SpeakerLabel, sequence: Sequence) {
        self.templates.push(Template::new(label, sequence));
    }

    /// Return all templates in insertion order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Return the template at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Template> {
        self.templates.get(index)
    }

    /// Return the number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Return true if the corpus holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Return each distinct speaker once, in order of first enrolment.
    #[must_use]
    pub fn speakers(&self) -> Vec<&SpeakerLabel> {
        let mut seen = HashSet::new();
        self.templates
            .iter()
            .map(|t| &t.label)
            .filter(|label| seen.insert(*label))
            .collect()
    }

    /// Iterate over the sequences enrolled for `label`.
    pub fn sequences_for<'a>(
        &'a self,
        label: &'a SpeakerLabel,
    ) -> impl Iterator<Item = &'a Sequence> + 'a {
        self.templates
            .iter()
            .filter(move |t| &t.label == label)
            .map(|t| &t.sequence)
    }

    /// Consume the corpus and return its templates.
    #[must_use]
    pub fn into_templates(self) -> Vec<Template> {
        self.templates
    }
}

impl FromIterator<Template> for TemplateCorpus {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

impl Extend<Template> for TemplateCorpus {
    fn extend<I: IntoIterator<Item = Template>>(&mut self, iter: I) {
        self.templates.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TemplateCorpus {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
