//! Core types and traits for quality rating.

mod error;
mod scorer;
mod session;
mod summary;

pub use error::{Error, Result};
pub use scorer::{Availability, NoData, Scorer, Severity, Status};
pub use session::Session;
pub use summary::{
    CoverageMetrics, CoverageSummary, ModuleCoverage, OutcomeDistribution, TestCase,
    TestRunSummary, TestStatus,
};
