//! Jump Detection Facade
//!
//! Unified re-exports for the jump detection module.
//!
//! This facade provides access to all jump detection components:
//! - `variation` - Realized variance estimators (quadratic, bipower, threshold bipower)
//! - `bns` / `threshold` - Variation-ratio jump tests
//! - `combined` - Combined decision rule and [`JumpDetector`]
//! - `sign_run` / `localization` - Sign-run test and jump localization
//! - `drift` - Mean-drift test
//! - `batch` - Parallel detection over many series

// Re-export everything from SPI (traits, errors, types)
pub use jump_spi::*;

// Re-export everything from API (configs)
pub use jump_api::*;

// Re-export everything from Core (implementations)
pub use jump_core::*;

/// Commonly used items.
pub mod prelude {
    pub use jump_api::{
        BipowerConfig, BipowerScaling, JumpConfig, LocalizationConfig, ThresholdRule,
    };
    pub use jump_core::{
        bns_test, combined_test, detect_batch, localize_jumps, mean_drift_test, sign_run_test,
        threshold_test, BnsTest, JumpDetector, MeanDriftTest, ThresholdTest,
    };
    pub use jump_spi::{
        CombinedTestResult, JumpError, JumpFlags, JumpLocalization, JumpTest, PriceSeries,
        Result, SignRunResult, TestResult, VariationStatistics,
    };
}
