//! Data models for jump detection.
//!
//! This module contains the value types produced and consumed by the
//! estimators, tests, and localization.

mod jump_flags;
mod price_series;
mod sign_run;
mod test_result;
mod variation;

pub use jump_flags::{JumpFlags, JumpLocalization};
pub use price_series::{LogReturnSeries, PriceSeries};
pub use sign_run::SignRunResult;
pub use test_result::{CombinedTestResult, TestResult};
pub use variation::VariationStatistics;
