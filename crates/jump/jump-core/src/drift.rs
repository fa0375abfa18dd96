//! Mean-drift test.
//!
//! Scores how far the absolute mean return sits above half the return
//! variance, in units of the return standard deviation:
//! `z = sqrt(n) * (|mean| - sigma^2 / 2) / sigma`. A one-sided test against
//! the upper normal quantile. This is not the BNS test and does not use
//! realized variation.

use jump_api::{validate_significance, DEFAULT_DRIFT_SIGNIFICANCE};
use jump_spi::{JumpError, JumpTest, Result, TestResult};

use crate::normal::critical_value;
use crate::variation::{ensure_finite, ensure_len, log_returns};

/// Run the mean-drift test over a return series.
///
/// Uses the population standard deviation. Fails with `InsufficientData`
/// for fewer than 2 returns and with `DegenerateInput` for zero dispersion.
pub fn mean_drift_test(returns: &[f64], significance_level: f64) -> Result<TestResult> {
    let critical = critical_value(significance_level)?;
    ensure_len(returns, 2)?;
    ensure_finite("returns", returns)?;

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let sigma = (returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();
    if sigma == 0.0 {
        return Err(JumpError::degenerate(
            "returns have zero standard deviation",
        ));
    }

    let z = n.sqrt() * (mean.abs() - 0.5 * sigma * sigma) / sigma;
    Ok(TestResult::new(z > critical, z, critical))
}

/// Mean-drift test over log-prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanDriftTest {
    significance_level: f64,
}

impl MeanDriftTest {
    pub fn new(significance_level: f64) -> Result<Self> {
        validate_significance("significance_level", significance_level)?;
        Ok(Self { significance_level })
    }
}

impl Default for MeanDriftTest {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_DRIFT_SIGNIFICANCE,
        }
    }
}

impl JumpTest for MeanDriftTest {
    fn name(&self) -> &str {
        "mean-drift"
    }

    fn test(&self, log_prices: &[f64]) -> Result<TestResult> {
        ensure_finite("log_prices", log_prices)?;
        let result = mean_drift_test(&log_returns(log_prices), self.significance_level)?;
        tracing::debug!(
            test = "mean-drift",
            statistic = result.test_statistic(),
            critical_value = result.critical_value(),
            jump_detected = result.jump_detected(),
            "jump test evaluated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_matches_formula() {
        let returns = [0.02, 0.01, 0.03, 0.02];
        let result = mean_drift_test(&returns, 0.001).unwrap();

        let mean = 0.02;
        let var: f64 = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / 4.0;
        let sd = var.sqrt();
        let expected = 2.0 * (mean - 0.5 * var) / sd;
        assert!((result.test_statistic() - expected).abs() < 1e-9);
        assert!((result.critical_value() - 3.090232306167813).abs() < 1e-8);
    }

    #[test]
    fn test_steady_drift_detected() {
        let returns: Vec<f64> = (0..50)
            .map(|i| 0.05 + if i % 2 == 0 { 0.001 } else { -0.001 })
            .collect();
        assert!(mean_drift_test(&returns, 0.001).unwrap().jump_detected());
    }

    #[test]
    fn test_symmetric_returns_not_detected() {
        let returns: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 0.01 } else { -0.01 }).collect();
        assert!(!mean_drift_test(&returns, 0.001).unwrap().jump_detected());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            mean_drift_test(&[0.01], 0.001),
            Err(JumpError::InsufficientData { required: 2, got: 1 })
        ));
        assert!(matches!(
            mean_drift_test(&[0.25, 0.25, 0.25], 0.001),
            Err(JumpError::DegenerateInput(_))
        ));
        assert!(MeanDriftTest::new(0.0).is_err());
    }

    #[test]
    fn test_trait_runs_on_log_prices() {
        let log_prices = [0.0, 0.02, 0.03, 0.06, 0.08];
        let via_trait = MeanDriftTest::default().test(&log_prices).unwrap();
        let returns: Vec<f64> = log_prices.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(via_trait, mean_drift_test(&returns, 0.001).unwrap());
        assert_eq!(MeanDriftTest::default().name(), "mean-drift");
    }
}
