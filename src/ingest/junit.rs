//! JUnit / Surefire XML reader.
//!
//! Accepts either a single `<testsuite>` document or a `<testsuites>`
//! wrapper. Counts are summed across every suite in the file.

use std::path::Path;
use std::time::Instant;

use quick_xml::de::from_str;
use serde::Deserialize;

use super::root_element;
use crate::core::{Error, Result, TestCase, TestRunSummary, TestStatus};

#[derive(Debug, Deserialize)]
struct RawSuites {
    #[serde(rename = "testsuite", default)]
    suites: Vec<RawSuite>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSuite {
    #[serde(rename = "@tests")]
    tests: Option<u64>,
    #[serde(rename = "@failures")]
    failures: Option<u64>,
    #[serde(rename = "@errors")]
    errors: Option<u64>,
    #[serde(rename = "@skipped")]
    skipped: Option<u64>,
    #[serde(rename = "@time")]
    time: Option<f64>,
    #[serde(rename = "testcase", default)]
    cases: Vec<RawCase>,
    #[serde(rename = "testsuite", default)]
    nested: Vec<RawSuite>,
}

#[derive(Debug, Deserialize)]
struct RawCase {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@classname", default)]
    classname: String,
    #[serde(rename = "@time")]
    time: Option<f64>,
    #[serde(default)]
    failure: Vec<RawOutcome>,
    #[serde(default)]
    error: Vec<RawOutcome>,
    #[serde(default)]
    skipped: Vec<RawOutcome>,
}

#[derive(Debug, Deserialize)]
struct RawOutcome {
    #[serde(rename = "@message")]
    message: Option<String>,
}

impl RawCase {
    fn status(&self) -> TestStatus {
        if !self.failure.is_empty() {
            TestStatus::Failed
        } else if !self.error.is_empty() {
            TestStatus::Error
        } else if !self.skipped.is_empty() {
            TestStatus::Skipped
        } else {
            TestStatus::Passed
        }
    }

    /// Message of the first failure or error, if any.
    fn message(&self) -> Option<String> {
        self.failure
            .iter()
            .chain(&self.error)
            .find_map(|o| o.message.clone())
    }
}

/// Running totals while walking the suites.
struct Totals<'p> {
    path: &'p Path,
    tests: u64,
    failures: u64,
    errors: u64,
    skipped: u64,
    time: f64,
    details: Vec<TestCase>,
}

impl<'p> Totals<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            tests: 0,
            failures: 0,
            errors: 0,
            skipped: 0,
            time: 0.0,
            details: Vec::new(),
        }
    }

    /// Add a suite and everything nested inside it.
    ///
    /// A suite wrapping nested suites carries aggregate attributes, so only
    /// its direct test cases are counted here; the children add their own.
    fn add(&mut self, suite: RawSuite) -> Result<()> {
        let details: Vec<TestCase> = suite
            .cases
            .into_iter()
            .map(|case| TestCase {
                status: case.status(),
                message: case.message(),
                time: case.time.unwrap_or(0.0),
                name: case.name,
                classname: case.classname,
            })
            .collect();

        let count = |status: TestStatus| details.iter().filter(|c| c.status == status).count() as u64;
        let case_time = || details.iter().map(|c| c.time).sum::<f64>();
        let (tests, failures, errors, skipped, time) = if suite.nested.is_empty() {
            (
                suite.tests.unwrap_or(details.len() as u64),
                suite.failures.unwrap_or_else(|| count(TestStatus::Failed)),
                suite.errors.unwrap_or_else(|| count(TestStatus::Error)),
                suite.skipped.unwrap_or_else(|| count(TestStatus::Skipped)),
                suite.time.unwrap_or_else(case_time),
            )
        } else {
            (
                details.len() as u64,
                count(TestStatus::Failed),
                count(TestStatus::Error),
                count(TestStatus::Skipped),
                case_time(),
            )
        };

        self.tests = self.sum("tests", self.tests, tests)?;
        self.failures = self.sum("failures", self.failures, failures)?;
        self.errors = self.sum("errors", self.errors, errors)?;
        self.skipped = self.sum("skipped", self.skipped, skipped)?;
        self.time += time;
        self.details.extend(details);

        for nested in suite.nested {
            self.add(nested)?;
        }
        Ok(())
    }

    fn sum(&self, field: &str, total: u64, value: u64) -> Result<u64> {
        total.checked_add(value).ok_or_else(|| {
            Error::malformed(
                "TestRunSummary",
                format!("{}: {field} count overflows", self.path.display()),
            )
        })
    }

    fn into_summary(self) -> Result<TestRunSummary> {
        let not_passed = self
            .sum("failures + errors", self.failures, self.errors)
            .and_then(|n| self.sum("failures + errors + skipped", n, self.skipped))?;
        let passed = self.tests.checked_sub(not_passed).ok_or_else(|| {
            Error::malformed(
                "TestRunSummary",
                format!(
                    "{}: failures + errors + skipped ({not_passed}) exceed tests ({})",
                    self.path.display(),
                    self.tests
                ),
            )
        })?;
        Ok(TestRunSummary {
            total_tests: self.tests,
            passed,
            failures: self.failures,
            errors: self.errors,
            skipped: self.skipped,
            execution_time: self.time,
            test_details: self.details,
        })
    }
}

/// Parse a JUnit XML document held in memory.
pub fn parse_str(xml: &str) -> Result<TestRunSummary> {
    parse(xml, Path::new("<memory>"))
}

/// Read and parse a JUnit XML report from disk.
pub fn load(path: impl AsRef<Path>) -> Result<TestRunSummary> {
    let path = path.as_ref();
    let start = Instant::now();
    let xml = std::fs::read_to_string(path).map_err(|e| Error::ingest(path, e.to_string()))?;
    let summary = parse(&xml, path)?;
    tracing::info!(
        "JUnit report loaded in {:?}: {} tests, {} failures, {} errors",
        start.elapsed(),
        summary.total_tests,
        summary.failures,
        summary.errors
    );
    Ok(summary)
}

fn parse(xml: &str, path: &Path) -> Result<TestRunSummary> {
    let invalid = |e: String| Error::ingest(path, format!("invalid JUnit XML: {e}"));

    let mut totals = Totals::new(path);
    match root_element(xml).map_err(|e| invalid(e.to_string()))?.as_str() {
        "testsuites" => {
            let raw: RawSuites = from_str(xml).map_err(|e| invalid(e.to_string()))?;
            for suite in raw.suites {
                totals.add(suite)?;
            }
        }
        "testsuite" => {
            let raw: RawSuite = from_str(xml).map_err(|e| invalid(e.to_string()))?;
            totals.add(raw)?;
        }
        "" => return Err(Error::ingest(path, "empty document")),
        other => {
            return Err(Error::ingest(
                path,
                format!("expected <testsuite> or <testsuites> root, found <{other}>"),
            ))
        }
    }
    totals.into_summary()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_SUITE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="com.example.CalculatorTest" tests="4" failures="1" errors="1" skipped="1" time="1.25">
  <properties>
    <property name="java.version" value="17"/>
  </properties>
  <testcase name="adds" classname="com.example.CalculatorTest" time="0.05"/>
  <testcase name="divides" classname="com.example.CalculatorTest" time="0.40">
    <failure message="expected 2 but was 3" type="AssertionError">stack</failure>
  </testcase>
  <testcase name="parses" classname="com.example.CalculatorTest" time="0.80">
    <error message="NullPointerException"/>
  </testcase>
  <testcase name="ignored" classname="com.example.CalculatorTest" time="0">
    <skipped/>
  </testcase>
  <system-out>log output</system-out>
</testsuite>"#;

    #[test]
    fn test_single_suite() {
        let summary = parse_str(SINGLE_SUITE).unwrap();
        assert_eq!(summary.total_tests, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.skipped, 1);
        assert!((summary.execution_time - 1.25).abs() < 1e-9);

        let statuses: Vec<TestStatus> = summary.test_details.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                TestStatus::Passed,
                TestStatus::Failed,
                TestStatus::Error,
                TestStatus::Skipped
            ]
        );
        assert_eq!(summary.test_details[2].name, "parses");
        assert!((summary.test_details[2].time - 0.8).abs() < 1e-9);
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn test_testsuites_wrapper_sums_suites() {
        let xml = r#"<testsuites>
  <testsuite name="a" tests="2" failures="0" errors="0" skipped="0" time="0.5">
    <testcase name="one" classname="a" time="0.2"/>
    <testcase name="two" classname="a" time="0.3"/>
  </testsuite>
  <testsuite name="b" tests="1" failures="1" errors="0" skipped="0" time="1.5">
    <testcase name="three" classname="b" time="1.5"><failure/></testcase>
  </testsuite>
</testsuites>"#;
        let summary = parse_str(xml).unwrap();
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failures, 1);
        assert!((summary.execution_time - 2.0).abs() < 1e-9);
        assert_eq!(summary.test_details.len(), 3);
    }

    #[test]
    fn test_missing_counts_are_derived_from_cases() {
        let xml = r#"<testsuite name="bare">
  <testcase name="ok" classname="bare" time="0.1"/>
  <testcase name="bad" classname="bare" time="0.2"><error/></testcase>
</testsuite>"#;
        let summary = parse_str(xml).unwrap();
        assert_eq!(summary.total_tests, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.passed, 1);
        assert!((summary.execution_time - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_suite() {
        let summary = parse_str(r#"<testsuite name="empty" tests="0" time="0"/>"#).unwrap();
        assert_eq!(summary.total_tests, 0);
        assert!(summary.test_details.is_empty());
    }

    #[test]
    fn test_inconsistent_counts_are_malformed() {
        let xml = r#"<testsuite tests="1" failures="2" errors="0" skipped="0" time="1"/>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_parent_suite_keeps_direct_cases() {
        let xml = r#"<testsuite name="outer" tests="3" failures="1">
  <testcase name="direct" classname="outer" time="0.5"><failure message="boom"/></testcase>
  <testsuite name="inner" tests="2" failures="0" time="0.4">
    <testcase name="a" classname="inner" time="0.2"/>
    <testcase name="b" classname="inner" time="0.2"/>
  </testsuite>
</testsuite>"#;
        let summary = parse_str(xml).unwrap();
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.test_details.len(), 3);
        assert!((summary.execution_time - 0.9).abs() < 1e-9);
        assert_eq!(summary.test_details[0].message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_failure_message_is_kept() {
        let summary = parse_str(SINGLE_SUITE).unwrap();
        assert_eq!(
            summary.test_details[1].message.as_deref(),
            Some("expected 2 but was 3")
        );
        assert_eq!(
            summary.test_details[2].message.as_deref(),
            Some("NullPointerException")
        );
        assert_eq!(summary.test_details[0].message, None);
    }

    #[test]
    fn test_count_overflow_is_malformed() {
        let xml = r#"<testsuites>
  <testsuite tests="18446744073709551615" failures="0" errors="0" skipped="0" time="1"/>
  <testsuite tests="1" failures="0" errors="0" skipped="0" time="1"/>
</testsuites>"#;
        let err = parse_str(xml).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
        assert!(err.to_string().contains("overflows"));

        let xml = r#"<testsuite tests="5" failures="18446744073709551615" errors="1" skipped="0"/>"#;
        assert!(matches!(
            parse_str(xml).unwrap_err(),
            Error::MalformedInput { .. }
        ));
    }

    #[test]
    fn test_wrong_root_is_ingest_error() {
        let err = parse_str("<report name=\"x\"/>").unwrap_err();
        assert!(matches!(err, Error::Ingest { .. }));
        assert!(err.to_string().contains("<report>"));
    }

    #[test]
    fn test_garbage_is_ingest_error() {
        assert!(matches!(
            parse_str("not xml at all").unwrap_err(),
            Error::Ingest { .. }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/TEST-report.xml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/TEST-report.xml"));
    }
}
