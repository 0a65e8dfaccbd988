//! Test-run and coverage summaries produced by report ingestion.

use serde::{Deserialize, Serialize};

use super::{Error, Result};

/// Outcome of a single test case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Failed,
    Error,
    Skipped,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
            Self::Skipped => "SKIPPED",
        }
    }

    /// Whether the outcome counts toward fault density.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single executed test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub classname: String,
    /// Execution time in seconds.
    pub time: f64,
    pub status: TestStatus,
    /// Failure or error message reported by the test framework.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate results of one test run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestRunSummary {
    pub total_tests: u64,
    pub passed: u64,
    pub failures: u64,
    pub errors: u64,
    pub skipped: u64,
    /// Total execution time in seconds.
    pub execution_time: f64,
    #[serde(default)]
    pub test_details: Vec<TestCase>,
}

/// Count of test cases per outcome.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct OutcomeDistribution {
    pub passed: u64,
    pub failed: u64,
    pub errored: u64,
    pub skipped: u64,
}

impl TestRunSummary {
    /// Check the counting invariants of the summary.
    ///
    /// Outcome counts must add up to `total_tests` whenever any test ran,
    /// and all times must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        const RECORD: &str = "TestRunSummary";

        if self.total_tests > 0 {
            let sum = self
                .passed
                .checked_add(self.failures)
                .and_then(|s| s.checked_add(self.errors))
                .and_then(|s| s.checked_add(self.skipped));
            if sum != Some(self.total_tests) {
                return Err(Error::malformed(
                    RECORD,
                    format!(
                        "passed ({}) + failures ({}) + errors ({}) + skipped ({}) != total_tests ({})",
                        self.passed, self.failures, self.errors, self.skipped, self.total_tests
                    ),
                ));
            }
        }
        if !self.execution_time.is_finite() || self.execution_time < 0.0 {
            return Err(Error::malformed(
                RECORD,
                format!("execution_time must be >= 0, got {}", self.execution_time),
            ));
        }
        if let Some(case) = self
            .test_details
            .iter()
            .find(|c| !c.time.is_finite() || c.time < 0.0)
        {
            return Err(Error::malformed(
                RECORD,
                format!("test case {} has negative time {}", case.name, case.time),
            ));
        }
        Ok(())
    }

    /// Outcome counts taken from the aggregate attributes.
    pub fn distribution(&self) -> OutcomeDistribution {
        OutcomeDistribution {
            passed: self.passed,
            failed: self.failures,
            errored: self.errors,
            skipped: self.skipped,
        }
    }

    /// The `n` slowest test cases, slowest first. Ties keep report order.
    pub fn slowest(&self, n: usize) -> Vec<&TestCase> {
        let mut cases: Vec<&TestCase> = self.test_details.iter().collect();
        cases.sort_by(|a, b| {
            b.time
                .partial_cmp(&a.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        cases.truncate(n);
        cases
    }

    /// Test cases that failed or errored, in report order.
    pub fn faulty_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.test_details.iter().filter(|c| c.status.is_fault())
    }
}

/// Coverage percentages and raw counters for one scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverageMetrics {
    pub line_coverage: f64,
    pub branch_coverage: f64,
    pub instruction_coverage: f64,
    pub complexity_coverage: f64,
    pub lines_covered: u64,
    pub lines_total: u64,
    pub branches_covered: u64,
    pub branches_total: u64,
}

impl CoverageMetrics {
    fn validate(&self, record: &'static str, scope: &str) -> Result<()> {
        let percentages = [
            ("line_coverage", self.line_coverage),
            ("branch_coverage", self.branch_coverage),
            ("instruction_coverage", self.instruction_coverage),
            ("complexity_coverage", self.complexity_coverage),
        ];
        for (field, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::malformed(
                    record,
                    format!("{scope}: {field} must be within [0, 100], got {value}"),
                ));
            }
        }
        if self.lines_covered > self.lines_total {
            return Err(Error::malformed(
                record,
                format!(
                    "{scope}: lines_covered ({}) exceeds lines_total ({})",
                    self.lines_covered, self.lines_total
                ),
            ));
        }
        if self.branches_covered > self.branches_total {
            return Err(Error::malformed(
                record,
                format!(
                    "{scope}: branches_covered ({}) exceeds branches_total ({})",
                    self.branches_covered, self.branches_total
                ),
            ));
        }
        Ok(())
    }
}

/// Coverage for a single module (a JaCoCo package).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModuleCoverage {
    pub name: String,
    #[serde(flatten)]
    pub metrics: CoverageMetrics,
}

/// Aggregate coverage of one report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverageSummary {
    #[serde(flatten)]
    pub totals: CoverageMetrics,
    #[serde(default)]
    pub module_details: Vec<ModuleCoverage>,
}

impl CoverageSummary {
    /// Build a summary from aggregate line and branch percentages only.
    pub fn from_percentages(line_coverage: f64, branch_coverage: f64) -> Self {
        Self {
            totals: CoverageMetrics {
                line_coverage,
                branch_coverage,
                ..Default::default()
            },
            module_details: Vec::new(),
        }
    }

    /// Check percentage ranges and covered <= total, for the aggregate and every module.
    pub fn validate(&self) -> Result<()> {
        const RECORD: &str = "CoverageSummary";
        self.totals.validate(RECORD, "report")?;
        for module in &self.module_details {
            module.metrics.validate(RECORD, &module.name)?;
        }
        Ok(())
    }

    /// The `n` modules with the lowest line coverage, lowest first.
    pub fn least_covered(&self, n: usize) -> Vec<&ModuleCoverage> {
        let mut modules: Vec<&ModuleCoverage> = self.module_details.iter().collect();
        modules.sort_by(|a, b| {
            a.metrics
                .line_coverage
                .partial_cmp(&b.metrics.line_coverage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        modules.truncate(n);
        modules
    }
}
