//! The explicit context holding the currently loaded summaries.

use tracing::debug;

use super::{CoverageSummary, Result, TestRunSummary};
use crate::score::QualityRatingCalculator;
use crate::scorers::performance;

/// Currently loaded test and coverage summaries.
///
/// Either slot may be empty; all four combinations are valid. Summaries are
/// validated on the way in and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    tests: Option<TestRunSummary>,
    coverage: Option<CoverageSummary>,
    performance: performance::Scorer,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tests: None,
            coverage: None,
            performance: performance::Scorer::new(),
        }
    }
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds per test at or below which performance scores 100.
    ///
    /// Rejects thresholds that are not finite and positive with
    /// [`Error::MalformedInput`](super::Error::MalformedInput).
    pub fn with_performance_threshold(mut self, threshold: f64) -> Result<Self> {
        self.performance = performance::Scorer::with_threshold(threshold)?;
        Ok(self)
    }

    pub fn performance_threshold(&self) -> f64 {
        self.performance.threshold()
    }

    pub(crate) fn performance_scorer(&self) -> performance::Scorer {
        self.performance
    }

    /// Calculator over the loaded summaries, using this session's threshold.
    pub fn calculator(&self) -> QualityRatingCalculator<'_> {
        QualityRatingCalculator::from_session(self)
    }

    /// Builder form of [`Session::load_tests`].
    pub fn with_tests(mut self, summary: TestRunSummary) -> Result<Self> {
        self.load_tests(summary)?;
        Ok(self)
    }

    /// Builder form of [`Session::load_coverage`].
    pub fn with_coverage(mut self, summary: CoverageSummary) -> Result<Self> {
        self.load_coverage(summary)?;
        Ok(self)
    }

    /// Replace the test summary, rejecting one that breaks its invariants.
    pub fn load_tests(&mut self, summary: TestRunSummary) -> Result<()> {
        summary.validate()?;
        debug!(
            total = summary.total_tests,
            failures = summary.failures,
            errors = summary.errors,
            "loaded test run summary"
        );
        self.tests = Some(summary);
        Ok(())
    }

    /// Replace the coverage summary, rejecting one that breaks its invariants.
    pub fn load_coverage(&mut self, summary: CoverageSummary) -> Result<()> {
        summary.validate()?;
        debug!(
            line = summary.totals.line_coverage,
            branch = summary.totals.branch_coverage,
            modules = summary.module_details.len(),
            "loaded coverage summary"
        );
        self.coverage = Some(summary);
        Ok(())
    }

    pub fn tests(&self) -> Option<&TestRunSummary> {
        self.tests.as_ref()
    }

    pub fn coverage(&self) -> Option<&CoverageSummary> {
        self.coverage.as_ref()
    }

    /// Drop both summaries.
    pub fn clear(&mut self) {
        self.tests = None;
        self.coverage = None;
    }
}
