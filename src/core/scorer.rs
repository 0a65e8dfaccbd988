//! Scorer trait and the classification types shared by all quality factors.

use serde::Serialize;

/// Trait implemented by the reliability, maintainability and performance scorers.
///
/// Scorers are pure: they read a borrowed summary and never fail. An absent
/// summary or a zero denominator is reported through the detail's
/// [`Availability`] instead of an error.
pub trait Scorer {
    /// The summary this scorer reads.
    type Input;
    /// Audit trail produced alongside the score.
    type Detail: Serialize;

    /// Unique identifier for this scorer.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Compute the factor score (0-100) and its detail record.
    fn score(&self, input: Option<&Self::Input>) -> (f64, Self::Detail);
}

/// Why a factor could not be measured.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoData {
    MissingTestReport,
    MissingCoverageReport,
    NoTestsExecuted,
}

impl std::fmt::Display for NoData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MissingTestReport => "No JUnit data available",
            Self::MissingCoverageReport => "No JaCoCo data available",
            Self::NoTestsExecuted => "No tests executed",
        })
    }
}

/// Whether a factor score was computed from data.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    /// Computed from the loaded summary.
    Measured,
    /// Nothing to measure; the score is the scorer's sentinel value.
    NoData { reason: NoData },
    /// Nothing to measure; the scorer assumed the best case.
    Assumed { note: &'static str },
}

impl Availability {
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured)
    }

    /// Short label used by reports and CLI views.
    pub fn label(&self) -> String {
        match self {
            Self::Measured => "measured".to_string(),
            Self::NoData { reason } => format!("no data ({reason})"),
            Self::Assumed { note } => format!("assumed ({note})"),
        }
    }
}

/// Display accent paired with a [`Status`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

/// Threshold classification of a factor metric.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Poor => "Poor",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Excellent => Severity::Success,
            Self::Good => Severity::Info,
            Self::Acceptable => Severity::Warning,
            Self::Poor => Severity::Danger,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
