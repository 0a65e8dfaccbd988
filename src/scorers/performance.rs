//! Performance-efficiency scorer based on average test time.

use serde::Serialize;

use crate::core::{Availability, Error, Result, Scorer as ScorerTrait, Status, TestRunSummary};

/// Default average time per test, in seconds, that still scores 100.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub const FORMULA: &str = "PS = min(100, (Threshold / Avg_Time) × 100)";
pub const STANDARD: &str = "ISO/IEC 25010:2011, Section 4.2.1";

const ASSUMED_NOTE: &str = "No performance data, assuming optimal";

/// Performance scorer - compares the average test time against a threshold.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    threshold: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Use a custom threshold in seconds per test. It must be finite and
    /// positive, otherwise the score could leave [0, 100].
    pub fn with_threshold(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::malformed(
                "performance threshold",
                format!("must be a positive number of seconds, got {threshold}"),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ScorerTrait for Scorer {
    type Input = TestRunSummary;
    type Detail = PerformanceDetail;

    fn name(&self) -> &'static str {
        "performance"
    }

    fn description(&self) -> &'static str {
        "Performance efficiency from average test execution time"
    }

    fn score(&self, input: Option<&TestRunSummary>) -> (f64, PerformanceDetail) {
        // Without a timing signal the factor is assumed optimal, unlike the
        // other two factors which fall back to zero.
        let run = match input {
            Some(run) if run.total_tests > 0 && run.execution_time > 0.0 => run,
            other => {
                return (
                    100.0,
                    PerformanceDetail {
                        availability: Availability::Assumed { note: ASSUMED_NOTE },
                        total_execution_time: other.map_or(0.0, |r| r.execution_time),
                        total_tests: other.map_or(0, |r| r.total_tests),
                        avg_test_time: 0.0,
                        threshold: self.threshold,
                        throughput: 0.0,
                        formula: FORMULA,
                        standard: STANDARD,
                        calculation: None,
                    },
                );
            }
        };

        let avg = avg_test_time(run);
        let score = if avg <= self.threshold {
            100.0
        } else {
            (self.threshold / avg * 100.0).min(100.0)
        };

        let detail = PerformanceDetail {
            availability: Availability::Measured,
            total_execution_time: run.execution_time,
            total_tests: run.total_tests,
            avg_test_time: avg,
            threshold: self.threshold,
            throughput: throughput(run),
            formula: FORMULA,
            standard: STANDARD,
            calculation: Some(format!(
                "PS = min(100, ({} / {avg:.4}) × 100) = {score:.2}",
                self.threshold
            )),
        };
        (score, detail)
    }
}

/// Audit trail of a performance score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceDetail {
    pub availability: Availability,
    pub total_execution_time: f64,
    pub total_tests: u64,
    pub avg_test_time: f64,
    pub threshold: f64,
    /// Tests per second.
    pub throughput: f64,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: Option<String>,
}

/// Average seconds per test; 0 for an empty run.
pub fn avg_test_time(run: &TestRunSummary) -> f64 {
    if run.total_tests == 0 {
        return 0.0;
    }
    run.execution_time / run.total_tests as f64
}

/// Tests executed per second; 0 when no time was recorded.
pub fn throughput(run: &TestRunSummary) -> f64 {
    if run.execution_time <= 0.0 {
        return 0.0;
    }
    run.total_tests as f64 / run.execution_time
}

/// Classify an average test time in seconds. Lower is better.
pub fn classify(avg_test_time: f64) -> Status {
    if avg_test_time < 0.1 {
        Status::Excellent
    } else if avg_test_time < 0.5 {
        Status::Good
    } else if avg_test_time < 1.0 {
        Status::Acceptable
    } else {
        Status::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(total: u64, time: f64) -> TestRunSummary {
        TestRunSummary {
            total_tests: total,
            passed: total,
            execution_time: time,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_run_assumes_optimal() {
        let (score, detail) = Scorer::new().score(None);
        assert_eq!(score, 100.0);
        assert!(matches!(detail.availability, Availability::Assumed { .. }));
    }

    #[test]
    fn test_zero_time_assumes_optimal() {
        let (score, detail) = Scorer::new().score(Some(&run(10, 0.0)));
        assert_eq!(score, 100.0);
        assert_eq!(detail.total_tests, 10);
        assert!(detail.calculation.is_none());
    }

    #[test]
    fn test_zero_tests_assumes_optimal() {
        let (score, _) = Scorer::new().score(Some(&run(0, 3.0)));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_average_at_threshold_scores_100() {
        let (score, detail) = Scorer::new().score(Some(&run(100, 50.0)));
        assert_eq!(score, 100.0);
        assert_eq!(detail.avg_test_time, 0.5);
        assert!(detail.availability.is_measured());
    }

    #[test]
    fn test_average_twice_threshold_scores_50() {
        let (score, detail) = Scorer::new().score(Some(&run(100, 100.0)));
        assert_eq!(score, 50.0);
        assert_eq!(
            detail.calculation.as_deref(),
            Some("PS = min(100, (0.5 / 1.0000) × 100) = 50.00")
        );
    }

    #[test]
    fn test_hyperbolic_decay_stays_positive() {
        let (score, _) = Scorer::new().score(Some(&run(1, 10_000.0)));
        assert!(score > 0.0);
        assert!(score < 0.01);
    }

    #[test]
    fn test_custom_threshold() {
        let scorer = Scorer::with_threshold(1.0).unwrap();
        let (score, detail) = scorer.score(Some(&run(10, 20.0)));
        assert!((score - 50.0).abs() < 1e-9);
        assert_eq!(detail.threshold, 1.0);
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        for threshold in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = Scorer::with_threshold(threshold).unwrap_err();
            assert!(matches!(err, Error::MalformedInput { .. }));
        }
    }

    #[test]
    fn test_throughput() {
        assert!((throughput(&run(100, 45.0)) - 100.0 / 45.0).abs() < 1e-9);
        assert_eq!(throughput(&run(100, 0.0)), 0.0);
    }

    #[test]
    fn test_avg_test_time() {
        assert!((avg_test_time(&run(100, 45.0)) - 0.45).abs() < 1e-9);
        assert_eq!(avg_test_time(&run(0, 45.0)), 0.0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), Status::Excellent);
        assert_eq!(classify(0.099), Status::Excellent);
        assert_eq!(classify(0.1), Status::Good);
        assert_eq!(classify(0.499), Status::Good);
        assert_eq!(classify(0.5), Status::Acceptable);
        assert_eq!(classify(0.999), Status::Acceptable);
        assert_eq!(classify(1.0), Status::Poor);
    }
}
