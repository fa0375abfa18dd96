//! Threshold (Andersen-style) jump test and threshold selection.
//!
//! Same statistic as the BNS test, with the variance adjustment taken from
//! threshold bipower variation: returns are clipped at a fixed cap before
//! they enter the estimate, which gives a second, differently biased
//! detector.

use jump_api::{validate_significance, BipowerConfig, JumpConfig, ThresholdRule};
use jump_spi::{JumpError, JumpTest, Result, TestResult};

use crate::bns::{ensure_nonzero_bipower, excess_variation_statistic, MIN_TEST_LEN};
use crate::normal::critical_value;
use crate::variation::{
    bipower_variation, ensure_finite, ensure_len, log_returns, quadratic_variation,
    threshold_bipower_variation,
};

/// Percentile of `values` using linear interpolation between order
/// statistics. `q` is in `[0, 1]`.
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = q * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower.min(sorted.len() - 1)]
    } else {
        let fraction = index - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Resolve a [`ThresholdRule`] against the log-returns of one series.
///
/// A derived threshold that is zero or not finite means the series has no
/// usable dispersion and is reported as `DegenerateInput`.
pub fn resolve_threshold(rule: &ThresholdRule, log_returns: &[f64]) -> Result<f64> {
    rule.validate()?;
    if let ThresholdRule::Fixed(t) = *rule {
        return Ok(t);
    }

    ensure_len(log_returns, 1)?;
    ensure_finite("log_returns", log_returns)?;

    let threshold = match *rule {
        ThresholdRule::AbsReturnPercentile(q) => {
            let abs: Vec<f64> = log_returns.iter().map(|r| r.abs()).collect();
            percentile(&abs, q)
        }
        ThresholdRule::StdDevMultiple(k) => {
            let n = log_returns.len() as f64;
            let mean = log_returns.iter().sum::<f64>() / n;
            let variance = log_returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            k * variance.sqrt()
        }
        ThresholdRule::Fixed(t) => t,
    };

    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(JumpError::degenerate(format!(
            "derived threshold {} is not positive; returns have no dispersion",
            threshold
        )));
    }
    Ok(threshold)
}

/// Threshold jump test with a fixed clipping threshold.
fn run_threshold_test(
    log_prices: &[f64],
    threshold: f64,
    critical: f64,
    bipower: &BipowerConfig,
) -> Result<TestResult> {
    ensure_len(log_prices, MIN_TEST_LEN)?;

    let n = (log_prices.len() - 1) as f64;
    let qv = quadratic_variation(log_prices)?;
    let bv = bipower_variation(log_prices, bipower)?;
    ensure_nonzero_bipower(bv)?;
    let tbv = threshold_bipower_variation(&log_returns(log_prices), threshold)?;

    let mu = tbv / n;
    let z = excess_variation_statistic(qv, mu, bv, n)?;
    let result = TestResult::new(z > critical, z, critical);

    tracing::debug!(
        test = "threshold",
        threshold,
        statistic = z,
        critical_value = critical,
        jump_detected = result.jump_detected(),
        "jump test evaluated"
    );
    Ok(result)
}

/// Threshold jump test whose clipping threshold comes from a [`ThresholdRule`].
///
/// @complexity O(n log n) for percentile rules, O(n) otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTest {
    rule: ThresholdRule,
    significance_level: f64,
    bipower: BipowerConfig,
}

impl ThresholdTest {
    /// Create a threshold test.
    pub fn new(rule: ThresholdRule, significance_level: f64) -> Result<Self> {
        rule.validate()?;
        validate_significance("significance_level", significance_level)?;
        Ok(Self {
            rule,
            significance_level,
            bipower: BipowerConfig::default(),
        })
    }

    /// Create from a detector configuration.
    pub fn from_config(config: &JumpConfig) -> Result<Self> {
        let test = Self::new(config.threshold, config.significance_level)?;
        config.bipower.validate()?;
        Ok(Self {
            bipower: config.bipower,
            ..test
        })
    }

    /// Get the threshold rule
    pub fn rule(&self) -> &ThresholdRule {
        &self.rule
    }

    /// Run the test and also return the threshold it used.
    pub fn test_with_threshold(&self, log_prices: &[f64]) -> Result<(TestResult, f64)> {
        let critical = critical_value(self.significance_level)?;
        ensure_len(log_prices, MIN_TEST_LEN)?;
        ensure_finite("log_prices", log_prices)?;
        let threshold = resolve_threshold(&self.rule, &log_returns(log_prices))?;
        let result = run_threshold_test(log_prices, threshold, critical, &self.bipower)?;
        Ok((result, threshold))
    }
}

impl JumpTest for ThresholdTest {
    fn name(&self) -> &str {
        "threshold"
    }

    fn test(&self, log_prices: &[f64]) -> Result<TestResult> {
        self.test_with_threshold(log_prices).map(|(result, _)| result)
    }
}

/// Run the threshold test with a caller-supplied threshold and the default
/// bipower estimator.
pub fn threshold_test(
    log_prices: &[f64],
    threshold: f64,
    significance_level: f64,
) -> Result<TestResult> {
    let critical = critical_value(significance_level)?;
    ThresholdRule::Fixed(threshold).validate()?;
    run_threshold_test(log_prices, threshold, critical, &BipowerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<f64> {
        // returns: 0.01, -0.02, 0.015, 0.5, -0.01, 0.005
        vec![0.0, 0.01, -0.01, 0.005, 0.505, 0.495, 0.5]
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 1.0), 5.0);
        assert!((percentile(&values, 0.5) - 3.0).abs() < 1e-12);
        assert!((percentile(&values, 0.95) - 4.8).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[0.7], 0.95), 0.7);
    }

    #[test]
    fn test_resolve_fixed() {
        let t = resolve_threshold(&ThresholdRule::Fixed(0.02), &[]).unwrap();
        assert_eq!(t, 0.02);
    }

    #[test]
    fn test_resolve_percentile() {
        let returns = [0.01, -0.02, 0.03, -0.04, 0.05];
        let t = resolve_threshold(&ThresholdRule::AbsReturnPercentile(0.95), &returns).unwrap();
        assert!((t - 0.048).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_std_dev_multiple() {
        let returns = [0.01, -0.01, 0.01, -0.01];
        let t = resolve_threshold(&ThresholdRule::StdDevMultiple(3.0), &returns).unwrap();
        assert!((t - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_zero_dispersion_is_degenerate() {
        let returns = [0.0; 5];
        assert!(matches!(
            resolve_threshold(&ThresholdRule::default(), &returns),
            Err(JumpError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_statistic_matches_formula() {
        let prices = sample();
        let threshold = 0.02;
        let result = threshold_test(&prices, threshold, 0.01).unwrap();

        let returns: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let n = returns.len() as f64;
        let qv: f64 = returns.iter().map(|r| r * r).sum();
        let bv: f64 = returns
            .windows(2)
            .map(|w| (w[0].abs() * w[1].abs()).sqrt())
            .sum();
        let clipped: f64 = returns
            .windows(2)
            .map(|w| w[0].abs().min(threshold) * w[1].abs().min(threshold))
            .sum();
        let tbv = (n - 1.0) * threshold * threshold - clipped;
        let expected = (qv - tbv) / (bv * n / (n - 1.0));

        assert!((result.test_statistic() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_threshold() {
        for bad in [0.0, -0.5, f64::NAN] {
            assert!(matches!(
                threshold_test(&sample(), bad, 0.01),
                Err(JumpError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_short_series_rejected() {
        assert!(matches!(
            threshold_test(&[0.0, 0.01, 0.02], 0.01, 0.01),
            Err(JumpError::InsufficientData { required: 4, got: 3 })
        ));
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        let flat = vec![4.0; 20];
        assert!(matches!(
            threshold_test(&flat, 0.01, 0.01),
            Err(JumpError::DegenerateInput(_))
        ));
        let rule_based = ThresholdTest::new(ThresholdRule::default(), 0.01).unwrap();
        assert!(matches!(
            rule_based.test(&flat),
            Err(JumpError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_rule_based_uses_resolved_threshold() {
        let prices = sample();
        let test = ThresholdTest::new(ThresholdRule::AbsReturnPercentile(0.95), 0.01).unwrap();
        let (result, threshold) = test.test_with_threshold(&prices).unwrap();

        let direct = threshold_test(&prices, threshold, 0.01).unwrap();
        assert_eq!(result, direct);
        assert_eq!(test.name(), "threshold");
    }
}
