//! Weighted quality score and letter rating.

mod rating;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{Availability, CoverageSummary, Result, Scorer, Session, Status, TestRunSummary};
use crate::scorers::{
    maintainability, performance, reliability, MaintainabilityDetail, PerformanceDetail,
    ReliabilityDetail,
};

pub use rating::{Rating, RatingBand, RatingDescription, RATING_BANDS};

pub const WEIGHT_RELIABILITY: f64 = 0.40;
pub const WEIGHT_MAINTAINABILITY: f64 = 0.40;
pub const WEIGHT_PERFORMANCE: f64 = 0.20;

const WEIGHT_SUM: f64 = WEIGHT_RELIABILITY + WEIGHT_MAINTAINABILITY + WEIGHT_PERFORMANCE;
const _: () = assert!(
    WEIGHT_SUM > 1.0 - 1e-9 && WEIGHT_SUM < 1.0 + 1e-9,
    "quality factor weights must sum to 1.0"
);

pub const FORMULA: &str = "WQS = (0.40 × RS) + (0.40 × MS) + (0.20 × PS)";
pub const STANDARD: &str = "ISO/IEC 25010:2011, Section 4.1";

/// Top-level factor weights.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Weights {
    pub reliability: f64,
    pub maintainability: f64,
    pub performance: f64,
}

impl Weights {
    pub const FIXED: Weights = Weights {
        reliability: WEIGHT_RELIABILITY,
        maintainability: WEIGHT_MAINTAINABILITY,
        performance: WEIGHT_PERFORMANCE,
    };
}

/// Combine three factor scores into the weighted quality score.
pub fn combine(reliability: f64, maintainability: f64, performance: f64) -> f64 {
    WEIGHT_RELIABILITY * reliability
        + WEIGHT_MAINTAINABILITY * maintainability
        + WEIGHT_PERFORMANCE * performance
}

/// Per-factor audit trails.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactorDetails {
    pub reliability: ReliabilityDetail,
    pub maintainability: MaintainabilityDetail,
    pub performance: PerformanceDetail,
}

/// Full result of one rating computation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreBreakdown {
    pub weighted_quality_score: f64,
    pub rating: Rating,
    pub rating_color: &'static str,
    pub reliability_score: f64,
    pub maintainability_score: f64,
    pub performance_score: f64,
    pub weights: Weights,
    pub details: FactorDetails,
    pub formula: &'static str,
    pub standard: &'static str,
    pub calculation: String,
}

/// Identifies one of the three quality factors.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Reliability,
    Maintainability,
    Performance,
}

impl Factor {
    pub const ALL: [Factor; 3] = [
        Factor::Reliability,
        Factor::Maintainability,
        Factor::Performance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Reliability => "Reliability",
            Factor::Maintainability => "Maintainability",
            Factor::Performance => "Performance Efficiency",
        }
    }
}

/// Condensed view of one factor for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactorView {
    pub factor: Factor,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
    /// Threshold classification; `None` when the factor was not measured.
    pub status: Option<Status>,
    pub availability: Availability,
}

impl ScoreBreakdown {
    pub fn description(&self) -> &'static RatingDescription {
        self.rating.description()
    }

    pub fn score_of(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Reliability => self.reliability_score,
            Factor::Maintainability => self.maintainability_score,
            Factor::Performance => self.performance_score,
        }
    }

    pub fn weight_of(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Reliability => self.weights.reliability,
            Factor::Maintainability => self.weights.maintainability,
            Factor::Performance => self.weights.performance,
        }
    }

    pub fn availability_of(&self, factor: Factor) -> Availability {
        match factor {
            Factor::Reliability => self.details.reliability.availability,
            Factor::Maintainability => self.details.maintainability.availability,
            Factor::Performance => self.details.performance.availability,
        }
    }

    /// Threshold status of a factor, classified on the metric each factor
    /// is judged by. Unmeasured factors have no status.
    pub fn status_of(&self, factor: Factor) -> Option<Status> {
        if !self.availability_of(factor).is_measured() {
            return None;
        }
        Some(match factor {
            Factor::Reliability => reliability::classify(self.details.reliability.fault_density),
            Factor::Maintainability => maintainability::classify(self.maintainability_score),
            Factor::Performance => performance::classify(self.details.performance.avg_test_time),
        })
    }

    pub fn factors(&self) -> Vec<FactorView> {
        Factor::ALL
            .iter()
            .map(|&factor| {
                let score = self.score_of(factor);
                let weight = self.weight_of(factor);
                FactorView {
                    factor,
                    score,
                    weight,
                    contribution: score * weight,
                    status: self.status_of(factor),
                    availability: self.availability_of(factor),
                }
            })
            .collect()
    }
}

/// Computes the weighted quality score over the currently loaded summaries.
///
/// Holds no state besides borrowed summaries and scorer parameters, so
/// every call recomputes from the inputs.
#[derive(Debug, Clone, Copy)]
pub struct QualityRatingCalculator<'a> {
    tests: Option<&'a TestRunSummary>,
    coverage: Option<&'a CoverageSummary>,
    reliability: reliability::Scorer,
    maintainability: maintainability::Scorer,
    performance: performance::Scorer,
}

impl<'a> QualityRatingCalculator<'a> {
    /// Calculator over summaries supplied directly.
    ///
    /// The summaries are taken as they are. Call `validate()` on them first,
    /// or load them through [`Session`], which rejects malformed records.
    pub fn new(tests: Option<&'a TestRunSummary>, coverage: Option<&'a CoverageSummary>) -> Self {
        Self {
            tests,
            coverage,
            reliability: reliability::Scorer::new(),
            maintainability: maintainability::Scorer::new(),
            performance: performance::Scorer::new(),
        }
    }

    /// Calculator over the summaries currently loaded in a session.
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            performance: session.performance_scorer(),
            ..Self::new(session.tests(), session.coverage())
        }
    }

    /// Override the performance threshold (seconds per test).
    pub fn with_performance_threshold(mut self, threshold: f64) -> Result<Self> {
        self.performance = performance::Scorer::with_threshold(threshold)?;
        Ok(self)
    }

    pub fn tests(&self) -> Option<&'a TestRunSummary> {
        self.tests
    }

    pub fn coverage(&self) -> Option<&'a CoverageSummary> {
        self.coverage
    }

    pub fn performance_threshold(&self) -> f64 {
        self.performance.threshold()
    }

    pub fn reliability_score(&self) -> (f64, ReliabilityDetail) {
        self.reliability.score(self.tests)
    }

    pub fn maintainability_score(&self) -> (f64, MaintainabilityDetail) {
        self.maintainability.score(self.coverage)
    }

    pub fn performance_score(&self) -> (f64, PerformanceDetail) {
        self.performance.score(self.tests)
    }

    /// Run all three scorers and combine them with the fixed weights.
    pub fn weighted_quality_score(&self) -> (f64, ScoreBreakdown) {
        let (reliability, rel_detail) = self.reliability_score();
        let (maintainability, maint_detail) = self.maintainability_score();
        let (performance, perf_detail) = self.performance_score();

        for (name, availability) in [
            (self.reliability.name(), rel_detail.availability),
            (self.maintainability.name(), maint_detail.availability),
            (self.performance.name(), perf_detail.availability),
        ] {
            if !availability.is_measured() {
                warn!(factor = name, "{}", availability.label());
            }
        }

        let wqs = combine(reliability, maintainability, performance);
        let rating = Self::rating_for(wqs);
        let calculation = format!(
            "WQS = (0.40 × {reliability:.2}) + (0.40 × {maintainability:.2}) + (0.20 × {performance:.2}) = {wqs:.2}"
        );
        debug!("{calculation}");
        info!(
            "Quality rating computed: {} (WQS {:.2})",
            rating.as_str(),
            wqs
        );

        let breakdown = ScoreBreakdown {
            weighted_quality_score: wqs,
            rating,
            rating_color: rating.color(),
            reliability_score: reliability,
            maintainability_score: maintainability,
            performance_score: performance,
            weights: Weights::FIXED,
            details: FactorDetails {
                reliability: rel_detail,
                maintainability: maint_detail,
                performance: perf_detail,
            },
            formula: FORMULA,
            standard: STANDARD,
            calculation,
        };
        (wqs, breakdown)
    }

    /// Convenience wrapper returning only the breakdown.
    pub fn breakdown(&self) -> ScoreBreakdown {
        self.weighted_quality_score().1
    }

    pub fn rating_for(wqs: f64) -> Rating {
        Rating::from_score(wqs)
    }

    pub fn description_for(rating: Rating) -> &'static RatingDescription {
        rating.description()
    }

    /// Hex accent colour for a rating.
    pub fn color_for(rating: Rating) -> &'static str {
        rating.color()
    }
}
