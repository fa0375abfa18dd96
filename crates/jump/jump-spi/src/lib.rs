//! Jump Detection Service Provider Interface
//!
//! Defines the domain model, error type, and test contract shared by the
//! jump detection crates.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::JumpTest;
pub use error::{JumpError, Result};
pub use model::{
    CombinedTestResult, JumpFlags, JumpLocalization, LogReturnSeries, PriceSeries,
    SignRunResult, TestResult, VariationStatistics,
};
