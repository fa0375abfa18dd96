//! Jump Detection Core
//!
//! Realized-variation estimators, hypothesis tests, the combined decision
//! rule, and jump localization.
//!
//! ## Tests
//!
//! - [`bns_test`] - quadratic vs. bipower variation (Barndorff-Nielsen–Shephard)
//! - [`threshold_test`] - the same statistic with threshold bipower variation
//! - [`combined_test`] - jump only when both tests agree
//! - [`sign_run_test`] - sign counts of consecutive price moves
//! - [`mean_drift_test`] - mean return against return dispersion
//!
//! All functions are pure and synchronous; independent series can be
//! processed on separate threads, see [`detect_batch`].

pub mod batch;
pub mod bns;
pub mod combined;
pub mod drift;
pub mod localization;
pub mod normal;
pub mod sign_run;
pub mod threshold;
pub mod variation;

pub use batch::detect_batch;
pub use bns::{bns_test, BnsTest, MIN_TEST_LEN};
pub use combined::{combined_test, JumpDetector};
pub use drift::{mean_drift_test, MeanDriftTest};
pub use localization::{localize_jumps, localize_jumps_with, MIN_LOCALIZATION_LEN};
pub use normal::{critical_value, inv_norm, normal_cdf};
pub use sign_run::sign_run_test;
pub use threshold::{resolve_threshold, threshold_test, ThresholdTest};
pub use variation::{
    bipower_variation, clipped_bipower_sum, quadratic_variation, threshold_bipower_variation,
    variation_statistics,
};
