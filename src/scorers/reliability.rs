//! Reliability scorer based on test fault density.

use serde::Serialize;

use crate::core::{Availability, NoData, Scorer as ScorerTrait, Status, TestRunSummary};

pub const FORMULA: &str = "RS = (1 - FD) × 100";
pub const STANDARD: &str = "IEEE Std 982.1-1988, Section 3.5.1";

/// Reliability scorer - inverts the fault density of a test run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scorer;

impl Scorer {
    pub fn new() -> Self {
        Self
    }
}

impl ScorerTrait for Scorer {
    type Input = TestRunSummary;
    type Detail = ReliabilityDetail;

    fn name(&self) -> &'static str {
        "reliability"
    }

    fn description(&self) -> &'static str {
        "Reliability from test fault density (failed and errored tests over total)"
    }

    fn score(&self, input: Option<&TestRunSummary>) -> (f64, ReliabilityDetail) {
        let Some(run) = input else {
            return (0.0, ReliabilityDetail::unavailable(NoData::MissingTestReport));
        };
        if run.total_tests == 0 {
            return (0.0, ReliabilityDetail::unavailable(NoData::NoTestsExecuted));
        }

        let fault_density = (run.failures + run.errors) as f64 / run.total_tests as f64;
        // Not clamped: summaries reaching the scorer satisfy faults <= total.
        let score = (1.0 - fault_density) * 100.0;

        let detail = ReliabilityDetail {
            availability: Availability::Measured,
            total_tests: run.total_tests,
            failures: run.failures,
            errors: run.errors,
            fault_density: fault_density * 100.0,
            formula: FORMULA,
            standard: STANDARD,
            calculation: Some(format!(
                "RS = (1 - {fault_density:.4}) × 100 = {score:.2}"
            )),
        };
        (score, detail)
    }
}

/// Audit trail of a reliability score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReliabilityDetail {
    pub availability: Availability,
    pub total_tests: u64,
    pub failures: u64,
    pub errors: u64,
    /// Fault density as a percentage.
    pub fault_density: f64,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: Option<String>,
}

impl ReliabilityDetail {
    fn unavailable(reason: NoData) -> Self {
        Self {
            availability: Availability::NoData { reason },
            total_tests: 0,
            failures: 0,
            errors: 0,
            fault_density: 0.0,
            formula: FORMULA,
            standard: STANDARD,
            calculation: None,
        }
    }
}

/// Percentage of tests that failed or errored; 0 for an empty run.
pub fn failure_density(run: &TestRunSummary) -> f64 {
    if run.total_tests == 0 {
        return 0.0;
    }
    (run.failures + run.errors) as f64 / run.total_tests as f64 * 100.0
}

/// Percentage of tests that passed; 0 for an empty run.
pub fn success_rate(run: &TestRunSummary) -> f64 {
    if run.total_tests == 0 {
        return 0.0;
    }
    run.passed as f64 / run.total_tests as f64 * 100.0
}

/// Classify a failure density percentage. Lower is better.
pub fn classify(failure_density_pct: f64) -> Status {
    if failure_density_pct < 5.0 {
        Status::Excellent
    } else if failure_density_pct < 10.0 {
        Status::Good
    } else if failure_density_pct < 20.0 {
        Status::Acceptable
    } else {
        Status::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(total: u64, passed: u64, failures: u64, errors: u64) -> TestRunSummary {
        TestRunSummary {
            total_tests: total,
            passed,
            failures,
            errors,
            skipped: total - passed - failures - errors,
            execution_time: 1.0,
            test_details: Vec::new(),
        }
    }

    #[test]
    fn test_absent_run_is_no_data() {
        let (score, detail) = Scorer::new().score(None);
        assert_eq!(score, 0.0);
        assert_eq!(
            detail.availability,
            Availability::NoData {
                reason: NoData::MissingTestReport
            }
        );
        assert!(detail.calculation.is_none());
    }

    #[test]
    fn test_empty_run_is_no_data() {
        let (score, detail) = Scorer::new().score(Some(&TestRunSummary::default()));
        assert_eq!(score, 0.0);
        assert_eq!(
            detail.availability,
            Availability::NoData {
                reason: NoData::NoTestsExecuted
            }
        );
    }

    #[test]
    fn test_no_faults_scores_exactly_100() {
        let (score, detail) = Scorer::new().score(Some(&run(42, 40, 0, 0)));
        assert_eq!(score, 100.0);
        assert_eq!(detail.fault_density, 0.0);
        assert!(detail.availability.is_measured());
    }

    #[test]
    fn test_fault_density_inversion() {
        let (score, detail) = Scorer::new().score(Some(&run(100, 95, 3, 2)));
        assert!((score - 95.0).abs() < 1e-9);
        assert!((detail.fault_density - 5.0).abs() < 1e-9);
        assert_eq!(detail.failures, 3);
        assert_eq!(detail.errors, 2);
        assert_eq!(
            detail.calculation.as_deref(),
            Some("RS = (1 - 0.0500) × 100 = 95.00")
        );
        assert_eq!(detail.formula, FORMULA);
        assert_eq!(detail.standard, STANDARD);
    }

    #[test]
    fn test_all_failing_scores_zero() {
        let (score, _) = Scorer::new().score(Some(&run(4, 0, 2, 2)));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_failure_density_and_success_rate() {
        let summary = run(200, 170, 20, 10);
        assert!((failure_density(&summary) - 15.0).abs() < 1e-9);
        assert!((success_rate(&summary) - 85.0).abs() < 1e-9);

        let empty = TestRunSummary::default();
        assert_eq!(failure_density(&empty), 0.0);
        assert_eq!(success_rate(&empty), 0.0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), Status::Excellent);
        assert_eq!(classify(4.99), Status::Excellent);
        assert_eq!(classify(5.0), Status::Good);
        assert_eq!(classify(9.99), Status::Good);
        assert_eq!(classify(10.0), Status::Acceptable);
        assert_eq!(classify(19.99), Status::Acceptable);
        assert_eq!(classify(20.0), Status::Poor);
        assert_eq!(classify(100.0), Status::Poor);
    }
}
