//! Jump Detection API
//!
//! Configuration types for the jump detection engine.

mod config;

// Re-export SPI types
pub use jump_spi::{
    CombinedTestResult, JumpError, JumpFlags, JumpLocalization, JumpTest, LogReturnSeries,
    PriceSeries, Result, SignRunResult, TestResult, VariationStatistics,
};

pub use config::*;
