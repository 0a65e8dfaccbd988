//! Maintainability (testability) scorer based on line and branch coverage.

use serde::Serialize;

use crate::core::{Availability, CoverageSummary, NoData, Scorer as ScorerTrait, Status};

/// Weight of line coverage in the blend.
pub const LINE_WEIGHT: f64 = 0.6;
/// Weight of branch coverage in the blend.
pub const BRANCH_WEIGHT: f64 = 0.4;

pub const STANDARDS: [&str; 3] = [
    "ISO/IEC 25010:2011, Section 4.2.6",
    "IEEE Std 829-2008, Section 5.3",
    "IEEE Std 1061-1998, Section 3.2.2",
];

/// Maintainability scorer - weighted average of line and branch coverage.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    line_weight: f64,
    branch_weight: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self::with_weights(LINE_WEIGHT, BRANCH_WEIGHT)
    }

    pub fn with_weights(line_weight: f64, branch_weight: f64) -> Self {
        Self {
            line_weight,
            branch_weight,
        }
    }

    fn formula(&self) -> String {
        format!(
            "MS = ({} × LC) + ({} × BC)",
            self.line_weight, self.branch_weight
        )
    }
}

impl ScorerTrait for Scorer {
    type Input = CoverageSummary;
    type Detail = MaintainabilityDetail;

    fn name(&self) -> &'static str {
        "maintainability"
    }

    fn description(&self) -> &'static str {
        "Maintainability from weighted line and branch coverage"
    }

    fn score(&self, input: Option<&CoverageSummary>) -> (f64, MaintainabilityDetail) {
        let Some(cov) = input else {
            return (
                0.0,
                MaintainabilityDetail {
                    availability: Availability::NoData {
                        reason: NoData::MissingCoverageReport,
                    },
                    line_coverage: 0.0,
                    branch_coverage: 0.0,
                    lines_covered: 0,
                    lines_total: 0,
                    branches_covered: 0,
                    branches_total: 0,
                    line_weight: self.line_weight,
                    branch_weight: self.branch_weight,
                    formula: self.formula(),
                    standards: STANDARDS.to_vec(),
                    calculation: None,
                },
            );
        };

        let totals = &cov.totals;
        let score =
            self.line_weight * totals.line_coverage + self.branch_weight * totals.branch_coverage;

        let detail = MaintainabilityDetail {
            availability: Availability::Measured,
            line_coverage: totals.line_coverage,
            branch_coverage: totals.branch_coverage,
            lines_covered: totals.lines_covered,
            lines_total: totals.lines_total,
            branches_covered: totals.branches_covered,
            branches_total: totals.branches_total,
            line_weight: self.line_weight,
            branch_weight: self.branch_weight,
            formula: self.formula(),
            standards: STANDARDS.to_vec(),
            calculation: Some(format!(
                "MS = ({} × {:.2}) + ({} × {:.2}) = {:.2}",
                self.line_weight,
                totals.line_coverage,
                self.branch_weight,
                totals.branch_coverage,
                score
            )),
        };
        (score, detail)
    }
}

/// Audit trail of a maintainability score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaintainabilityDetail {
    pub availability: Availability,
    pub line_coverage: f64,
    pub branch_coverage: f64,
    pub lines_covered: u64,
    pub lines_total: u64,
    pub branches_covered: u64,
    pub branches_total: u64,
    pub line_weight: f64,
    pub branch_weight: f64,
    pub formula: String,
    pub standards: Vec<&'static str>,
    pub calculation: Option<String>,
}

/// Classify a maintainability score. Higher is better.
pub fn classify(score: f64) -> Status {
    if score >= 80.0 {
        Status::Excellent
    } else if score >= 70.0 {
        Status::Good
    } else if score >= 60.0 {
        Status::Acceptable
    } else {
        Status::Poor
    }
}
