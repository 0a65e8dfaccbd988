//! qgrade - software quality rating from test and coverage reports.
//!
//! qgrade reads JUnit test reports and JaCoCo coverage reports, scores
//! reliability, maintainability and performance efficiency, combines them
//! into a weighted quality score (WQS) and maps it to a letter rating A-E.
//!
//! # Example
//!
//! ```
//! use qgrade::core::{CoverageSummary, Session, TestRunSummary};
//! use qgrade::score::Rating;
//!
//! let run = TestRunSummary {
//!     total_tests: 100,
//!     passed: 95,
//!     failures: 3,
//!     errors: 2,
//!     skipped: 0,
//!     execution_time: 45.0,
//!     test_details: Vec::new(),
//! };
//! let session = Session::new()
//!     .with_tests(run)?
//!     .with_coverage(CoverageSummary::from_percentages(85.0, 70.0))?;
//!
//! let (wqs, breakdown) = session.calculator().weighted_quality_score();
//! assert!((wqs - 89.6).abs() < 1e-9);
//! assert_eq!(breakdown.rating, Rating::B);
//! # Ok::<(), qgrade::core::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ingest;
pub mod output;
pub mod report;
pub mod score;
pub mod scorers;

pub use core::{Error, Result, Scorer, Session};
pub use score::{QualityRatingCalculator, Rating, ScoreBreakdown};
