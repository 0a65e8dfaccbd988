//! Per-factor quality scorers.
//!
//! Each scorer turns one input summary into a 0-100 score plus a detail
//! record citing the formula and standard it applies.

pub mod maintainability;
pub mod performance;
pub mod reliability;

pub use maintainability::MaintainabilityDetail;
pub use performance::PerformanceDetail;
pub use reliability::ReliabilityDetail;
