//! Barndorff-Nielsen–Shephard jump test.
//!
//! Compares realized quadratic variation, which picks up jumps, against
//! bipower variation, which is robust to isolated large returns. A large
//! positive excess of the former over the adjusted latter signals a jump.

use jump_api::{validate_significance, BipowerConfig, JumpConfig};
use jump_spi::{JumpError, JumpTest, Result, TestResult};

use crate::normal::critical_value;
use crate::variation::{bipower_variation, ensure_len, quadratic_variation};

/// Minimum number of log-prices accepted by the BNS and threshold tests
/// (at least 3 returns).
pub const MIN_TEST_LEN: usize = 4;

/// Shared statistic of the BNS and threshold tests:
/// `(qv - mu * n) / (bv * (1 - 1/n)^-1)`.
pub(crate) fn excess_variation_statistic(qv: f64, mu: f64, bv: f64, n: f64) -> Result<f64> {
    if !mu.is_finite() {
        return Err(JumpError::degenerate(format!(
            "variance adjustment factor is not finite ({})",
            mu
        )));
    }
    let z = (qv - mu * n) / (bv / (1.0 - 1.0 / n));
    if !z.is_finite() {
        return Err(JumpError::degenerate(format!(
            "test statistic is not finite ({})",
            z
        )));
    }
    Ok(z)
}

pub(crate) fn ensure_nonzero_bipower(bv: f64) -> Result<()> {
    if bv == 0.0 {
        return Err(JumpError::degenerate(
            "bipower variation is zero; test statistic is undefined",
        ));
    }
    Ok(())
}

/// BNS jump test over a log-price series.
///
/// @complexity O(n)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BnsTest {
    significance_level: f64,
    bipower: BipowerConfig,
}

impl BnsTest {
    /// Create a BNS test with the default (raw, power 1/2) bipower estimator.
    pub fn new(significance_level: f64) -> Result<Self> {
        validate_significance("significance_level", significance_level)?;
        Ok(Self {
            significance_level,
            bipower: BipowerConfig::default(),
        })
    }

    /// Create from a detector configuration.
    pub fn from_config(config: &JumpConfig) -> Result<Self> {
        Self::new(config.significance_level)?.with_bipower(config.bipower)
    }

    /// Use a different bipower estimator.
    pub fn with_bipower(mut self, bipower: BipowerConfig) -> Result<Self> {
        bipower.validate()?;
        self.bipower = bipower;
        Ok(self)
    }

    /// Get the significance level
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }
}

impl JumpTest for BnsTest {
    fn name(&self) -> &str {
        "bns"
    }

    fn test(&self, log_prices: &[f64]) -> Result<TestResult> {
        let critical = critical_value(self.significance_level)?;
        ensure_len(log_prices, MIN_TEST_LEN)?;

        let n = (log_prices.len() - 1) as f64;
        let qv = quadratic_variation(log_prices)?;
        let bv = bipower_variation(log_prices, &self.bipower)?;
        ensure_nonzero_bipower(bv)?;

        let mu = (bv / n) * (1.0 + 0.5 * (8.0 / (3.0 * n)).sqrt());
        let z = excess_variation_statistic(qv, mu, bv, n)?;
        let result = TestResult::new(z > critical, z, critical);

        tracing::debug!(
            test = "bns",
            statistic = z,
            critical_value = critical,
            jump_detected = result.jump_detected(),
            "jump test evaluated"
        );
        Ok(result)
    }
}

/// Run the BNS test with the default bipower estimator.
pub fn bns_test(log_prices: &[f64], significance_level: f64) -> Result<TestResult> {
    BnsTest::new(significance_level)?.test(log_prices)
}
