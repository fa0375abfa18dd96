//! Combined decision rule.
//!
//! A jump is declared only when both the BNS test and the threshold test
//! detect one.

use jump_api::{BipowerConfig, JumpConfig, ThresholdRule};
use jump_spi::{CombinedTestResult, JumpTest, PriceSeries, Result, VariationStatistics};

use crate::bns::{bns_test, BnsTest, MIN_TEST_LEN};
use crate::threshold::{resolve_threshold, threshold_test, ThresholdTest};
use crate::variation::{ensure_finite, ensure_len, log_returns, variation_statistics};

/// Run both tests with a caller-supplied threshold and AND their verdicts.
pub fn combined_test(
    log_prices: &[f64],
    threshold: f64,
    significance_level: f64,
) -> Result<CombinedTestResult> {
    let bns = bns_test(log_prices, significance_level)?;
    let thresholded = threshold_test(log_prices, threshold, significance_level)?;
    Ok(CombinedTestResult::new(bns, thresholded, threshold))
}

/// Jump detector driven by a [`JumpConfig`].
///
/// The clipping threshold is resolved once per series from the configured
/// [`ThresholdRule`] and then shared by every statistic of that call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpDetector {
    config: JumpConfig,
}

impl JumpDetector {
    /// Create a detector, validating the configuration.
    pub fn new(config: JumpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &JumpConfig {
        &self.config
    }

    /// Resolve the clipping threshold for one log-price series.
    pub fn threshold_for(&self, log_prices: &[f64]) -> Result<f64> {
        ensure_finite("log_prices", log_prices)?;
        resolve_threshold(&self.config.threshold, &log_returns(log_prices))
    }

    /// Compute the realized-variation statistics of one log-price series.
    pub fn statistics(&self, log_prices: &[f64]) -> Result<VariationStatistics> {
        let threshold = self.threshold_for(log_prices)?;
        variation_statistics(log_prices, threshold, &self.config.bipower)
    }

    /// Run the combined rule over log-prices.
    pub fn detect(&self, log_prices: &[f64]) -> Result<CombinedTestResult> {
        ensure_len(log_prices, MIN_TEST_LEN)?;
        let threshold = self.threshold_for(log_prices)?;
        let fixed = JumpConfig {
            threshold: ThresholdRule::Fixed(threshold),
            ..self.config
        };

        let bns = BnsTest::from_config(&self.config)?.test(log_prices)?;
        let thresholded = ThresholdTest::from_config(&fixed)?.test(log_prices)?;
        let result = CombinedTestResult::new(bns, thresholded, threshold);

        tracing::debug!(
            jump_detected = result.jump_detected(),
            bns_statistic = bns.test_statistic(),
            threshold_statistic = thresholded.test_statistic(),
            threshold,
            "combined jump test evaluated"
        );
        Ok(result)
    }

    /// Run the combined rule over a price series.
    pub fn detect_series(&self, series: &PriceSeries) -> Result<CombinedTestResult> {
        self.detect(&series.log_prices())
    }

    /// Bipower settings in use.
    pub fn bipower(&self) -> &BipowerConfig {
        &self.config.bipower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jump_spi::JumpError;

    fn sample() -> Vec<f64> {
        vec![0.0, 0.01, -0.01, 0.005, 0.505, 0.495, 0.5, 0.51, 0.5]
    }

    #[test]
    fn test_combined_is_conjunction() {
        let prices = sample();
        let result = combined_test(&prices, 0.02, 0.01).unwrap();
        assert_eq!(
            result.jump_detected(),
            result.bns().jump_detected() && result.threshold().jump_detected()
        );
        assert_eq!(result.threshold_value(), 0.02);
    }

    #[test]
    fn test_combined_matches_components() {
        let prices = sample();
        let result = combined_test(&prices, 0.02, 0.01).unwrap();
        assert_eq!(result.bns(), &bns_test(&prices, 0.01).unwrap());
        assert_eq!(result.threshold(), &threshold_test(&prices, 0.02, 0.01).unwrap());
    }

    #[test]
    fn test_combined_constant_series_is_degenerate() {
        let flat = vec![4.0; 12];
        assert!(matches!(
            combined_test(&flat, 0.01, 0.01),
            Err(JumpError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_detector_matches_free_function_for_fixed_threshold() {
        let prices = sample();
        let detector = JumpDetector::new(JumpConfig::new(0.01).with_threshold(0.02)).unwrap();
        assert_eq!(
            detector.detect(&prices).unwrap(),
            combined_test(&prices, 0.02, 0.01).unwrap()
        );
    }

    #[test]
    fn test_detector_resolves_threshold_once() {
        let prices = sample();
        let detector = JumpDetector::default();
        let threshold = detector.threshold_for(&prices).unwrap();
        let result = detector.detect(&prices).unwrap();
        assert_eq!(result.threshold_value(), threshold);
        assert_eq!(result, combined_test(&prices, threshold, 0.01).unwrap());
    }

    #[test]
    fn test_detector_reports_required_log_prices() {
        let detector = JumpDetector::default();
        for len in 0..MIN_TEST_LEN {
            let prices: Vec<f64> = (0..len).map(|i| i as f64 * 0.01).collect();
            assert_eq!(
                detector.detect(&prices),
                Err(JumpError::InsufficientData {
                    required: MIN_TEST_LEN,
                    got: len
                })
            );
        }
    }

    #[test]
    fn test_detector_rejects_invalid_config() {
        assert!(JumpDetector::new(JumpConfig::new(0.0)).is_err());
        assert!(JumpDetector::new(JumpConfig::default().with_threshold(-1.0)).is_err());
    }

    #[test]
    fn test_detect_series_uses_log_prices() {
        let series = PriceSeries::new(vec![100.0, 101.0, 99.0, 100.5, 160.0, 158.0, 161.0])
            .unwrap();
        let detector = JumpDetector::default();
        assert_eq!(
            detector.detect_series(&series).unwrap(),
            detector.detect(&series.log_prices()).unwrap()
        );
    }

    #[test]
    fn test_statistics_uses_resolved_threshold() {
        let prices = sample();
        let detector = JumpDetector::new(JumpConfig::default().with_threshold(0.02)).unwrap();
        let stats = detector.statistics(&prices).unwrap();
        assert_eq!(
            stats,
            variation_statistics(&prices, 0.02, &BipowerConfig::default()).unwrap()
        );
    }
}
