//! Configuration builder for the template matcher.

use speakerid_dtw::{AlignerKind, BandConstraint, Convention, Strategy};

use crate::matcher::TemplateMatcher;

/// Configuration for [`TemplateMatcher`].
///
/// Construct via [`MatcherConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter    | Default                              |
/// |--------------|--------------------------------------|
/// | `convention` | `Convention::Legacy`                 |
/// | `band`       | `BandConstraint::LengthDifference`   |
/// | `parallel`   | `true`                               |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    pub(crate) kind: AlignerKind,
    pub(crate) convention: Convention,
    pub(crate) band: BandConstraint,
    pub(crate) parallel: bool,
}

impl MatcherConfig {
    /// Create a configuration for the given aligner kind.
    #[must_use]
    pub fn new(kind: AlignerKind) -> Self {
        Self {
            kind,
            convention: Convention::Legacy,
            band: BandConstraint::LengthDifference,
            parallel: true,
        }
    }

    /// Set the recurrence convention used by the aligner.
    #[must_use]
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the band constraint. Only the banded aligner reads it.
    #[must_use]
    pub fn with_band(mut self, band: BandConstraint) -> Self {
        self.band = band;
        self
    }

    /// Scan the corpus on rayon's thread pool (default) or on the calling
    /// thread. Both produce identical results.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the aligner kind.
    #[must_use]
    pub fn kind(&self) -> AlignerKind {
        self.kind
    }

    /// Return the recurrence convention.
    #[must_use]
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Return the band constraint.
    #[must_use]
    pub fn band(&self) -> BandConstraint {
        self.band
    }

    /// Return whether the corpus scan runs in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Return the aligner strategy described by this configuration.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        Strategy::new(self.kind, self.convention, self.band)
    }

    /// Build a matcher from this configuration.
    #[must_use]
    pub fn build(&self) -> TemplateMatcher {
        TemplateMatcher::new(self)
    }
}
